// libs/directory-cell/src/services/catalog.rs
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::models::{
    CatalogRecords, Capabilities, DirectoryError, Facility, FacilityId, FacilityRecord,
    MalformedCatalogData, Provider, ProviderId, ProviderRecord, Symptom,
};
use crate::services::seed;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("leading number pattern is valid"));

/// Supplies provider and facility records. Loaded once per session, never written back.
pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;

    fn load(&self) -> Result<CatalogRecords>;
}

/// The built-in Delhi catalog the kiosk ships with.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedCatalog;

impl CatalogSource for SeedCatalog {
    fn describe(&self) -> String {
        "built-in seed catalog".to_string()
    }

    fn load(&self) -> Result<CatalogRecords> {
        Ok(seed::seed_records())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }

    fn load(&self) -> Result<CatalogRecords> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read catalog file {}", self.path.display()))?;

        let records: CatalogRecords = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse catalog file {}", self.path.display()))?;

        Ok(records)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: CatalogRecords,
}

impl InMemoryCatalog {
    pub fn new(records: CatalogRecords) -> Self {
        Self { records }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn describe(&self) -> String {
        format!(
            "in-memory catalog ({} providers, {} facilities)",
            self.records.providers.len(),
            self.records.facilities.len()
        )
    }

    fn load(&self) -> Result<CatalogRecords> {
        Ok(self.records.clone())
    }
}

/// Validated, typed and immutable snapshot of the provider/facility catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    providers: Vec<Provider>,
    facilities: Vec<Facility>,
    provider_index: HashMap<ProviderId, usize>,
    facility_index: HashMap<FacilityId, usize>,
    warnings: Vec<MalformedCatalogData>,
}

impl Catalog {
    /// Convert raw records into a catalog.
    ///
    /// Unreadable numeric text and unknown symptom tags are replaced by
    /// defaults and recorded as warnings. Duplicate ids and providers that
    /// point at a missing facility reject the whole catalog.
    pub fn ingest(records: CatalogRecords) -> Result<Self, DirectoryError> {
        let mut warnings = Vec::new();

        let mut facilities = Vec::with_capacity(records.facilities.len());
        let mut facility_index = HashMap::new();
        for record in records.facilities {
            if facility_index.contains_key(&record.id) {
                return Err(DirectoryError::DuplicateId { kind: "facility", id: record.id });
            }
            facility_index.insert(record.id, facilities.len());
            facilities.push(ingest_facility(record, &mut warnings));
        }

        let mut providers = Vec::with_capacity(records.providers.len());
        let mut provider_index = HashMap::new();
        for record in records.providers {
            if provider_index.contains_key(&record.id) {
                return Err(DirectoryError::DuplicateId { kind: "provider", id: record.id });
            }
            if !facility_index.contains_key(&record.hospital_id) {
                return Err(DirectoryError::DanglingFacility {
                    provider_id: record.id,
                    facility_id: record.hospital_id,
                });
            }
            provider_index.insert(record.id, providers.len());
            providers.push(ingest_provider(record, &mut warnings));
        }

        for warning in &warnings {
            warn!("{}, using default", warning);
        }

        debug!(
            "Ingested catalog with {} providers, {} facilities, {} warnings",
            providers.len(),
            facilities.len(),
            warnings.len()
        );

        Ok(Self {
            providers,
            facilities,
            provider_index,
            facility_index,
            warnings,
        })
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn provider(&self, id: ProviderId) -> Option<&Provider> {
        self.provider_index.get(&id).map(|&idx| &self.providers[idx])
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facility_index.get(&id).map(|&idx| &self.facilities[idx])
    }

    pub fn warnings(&self) -> &[MalformedCatalogData] {
        &self.warnings
    }
}

/// Leading whole number of a free-text field, e.g. `"15 years"` → 15.
pub fn parse_leading_number(text: &str) -> Option<u32> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

fn ingest_provider(record: ProviderRecord, warnings: &mut Vec<MalformedCatalogData>) -> Provider {
    let label = format!("provider {}", record.id);

    let experience_years = parse_leading_number(&record.experience).unwrap_or_else(|| {
        warnings.push(MalformedCatalogData {
            record: label.clone(),
            field: "experience",
            value: record.experience.clone(),
        });
        0
    });

    let rating = checked_rating(record.rating, &label, warnings);

    let consultation_fee = if record.consultation_fee.is_finite() && record.consultation_fee >= 0.0 {
        record.consultation_fee
    } else {
        warnings.push(MalformedCatalogData {
            record: label.clone(),
            field: "consultation_fee",
            value: record.consultation_fee.to_string(),
        });
        0.0
    };

    let mut treatable_symptoms = BTreeSet::new();
    for tag in &record.symptoms {
        match tag.parse::<Symptom>() {
            Ok(symptom) => {
                treatable_symptoms.insert(symptom);
            }
            Err(_) => warnings.push(MalformedCatalogData {
                record: label.clone(),
                field: "symptoms",
                value: tag.clone(),
            }),
        }
    }

    Provider {
        id: record.id,
        name: record.name,
        avatar: record.avatar,
        specialization: record.specialization,
        rating,
        review_count: record.reviews,
        experience_years,
        facility_id: record.hospital_id,
        locality: record.location,
        consultation_fee,
        capabilities: Capabilities {
            teleconsultation: record.teleconsultation,
            in_person: record.in_person,
        },
        next_available: record.next_available,
        languages: record.languages,
        education: record.education,
        treatable_symptoms,
        available_time_slots: record.time_slots,
    }
}

fn ingest_facility(record: FacilityRecord, warnings: &mut Vec<MalformedCatalogData>) -> Facility {
    let label = format!("facility {}", record.id);

    let established_year = record.established.trim().parse::<i32>().unwrap_or_else(|_| {
        warnings.push(MalformedCatalogData {
            record: label.clone(),
            field: "established",
            value: record.established.clone(),
        });
        0
    });

    let rating = checked_rating(record.rating, &label, warnings);

    Facility {
        id: record.id,
        name: record.name,
        locality: record.location,
        address: record.address,
        phone: record.phone,
        rating,
        review_count: record.reviews,
        emergency_capable: record.emergency,
        specialties: record.specialties,
        bed_count: record.beds,
        doctor_count: record.doctors,
        established_year,
        image: record.image,
    }
}

fn checked_rating(rating: f32, label: &str, warnings: &mut Vec<MalformedCatalogData>) -> f32 {
    if rating.is_finite() && (0.0..=5.0).contains(&rating) {
        return rating;
    }

    warnings.push(MalformedCatalogData {
        record: label.to_string(),
        field: "rating",
        value: rating.to_string(),
    });

    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    }
}
