use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProviderId = u32;
pub type FacilityId = u32;

// ==============================================================================
// SYMPTOMS
// ==============================================================================

/// Closed vocabulary joining a patient's complaint to what a provider treats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Headache,
    ChestPain,
    BackPain,
    EyeProblems,
    EarProblems,
    Fever,
    GeneralCheckup,
}

impl Symptom {
    pub const ALL: [Symptom; 7] = [
        Symptom::Headache,
        Symptom::ChestPain,
        Symptom::BackPain,
        Symptom::EyeProblems,
        Symptom::EarProblems,
        Symptom::Fever,
        Symptom::GeneralCheckup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Headache => "headache",
            Symptom::ChestPain => "chest-pain",
            Symptom::BackPain => "back-pain",
            Symptom::EyeProblems => "eye-problems",
            Symptom::EarProblems => "ear-problems",
            Symptom::Fever => "fever",
            Symptom::GeneralCheckup => "general-checkup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Headache => "Headache",
            Symptom::ChestPain => "Chest Pain",
            Symptom::BackPain => "Back Pain",
            Symptom::EyeProblems => "Eye Problems",
            Symptom::EarProblems => "Ear Problems",
            Symptom::Fever => "Fever",
            Symptom::GeneralCheckup => "General Checkup",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symptom {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Symptom::ALL
            .iter()
            .copied()
            .find(|symptom| symptom.as_str() == tag)
            .ok_or_else(|| DirectoryError::UnknownSymptom(s.to_string()))
    }
}

// ==============================================================================
// QUERY TYPES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationType {
    #[default]
    #[serde(alias = "both-options")]
    Both,
    Teleconsultation,
    InPerson,
}

impl ConsultationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::Both => "both",
            ConsultationType::Teleconsultation => "teleconsultation",
            ConsultationType::InPerson => "in-person",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "both" | "both-options" => Ok(ConsultationType::Both),
            "teleconsultation" => Ok(ConsultationType::Teleconsultation),
            "in-person" => Ok(ConsultationType::InPerson),
            _ => Err(DirectoryError::UnknownConsultationType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Rating,
    Experience,
    Fee,
}

impl FromStr for SortBy {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortBy::Rating),
            "experience" => Ok(SortBy::Experience),
            "fee" => Ok(SortBy::Fee),
            _ => Err(DirectoryError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Filter and ordering criteria for `ProviderDirectory::search`.
///
/// `symptom` and `locality` stay free text so that tags outside the catalog
/// simply match nothing. Empty strings and the `all` sentinels match everyone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuery {
    pub text: String,
    pub symptom: Option<String>,
    pub locality: Option<String>,
    pub consultation_type: ConsultationType,
    /// `None` keeps catalog order.
    pub sort_by: Option<SortBy>,
}

impl ProviderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_symptom(mut self, symptom: impl Into<String>) -> Self {
        self.symptom = Some(symptom.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_consultation_type(mut self, consultation_type: ConsultationType) -> Self {
        self.consultation_type = consultation_type;
        self
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

// ==============================================================================
// CATALOG ENTITIES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub teleconsultation: bool,
    pub in_person: bool,
}

impl Capabilities {
    pub fn is_bookable(&self) -> bool {
        self.teleconsultation || self.in_person
    }

    /// `Both` passes every provider, bookable or not.
    pub fn supports(&self, consultation_type: ConsultationType) -> bool {
        match consultation_type {
            ConsultationType::Both => true,
            ConsultationType::Teleconsultation => self.teleconsultation,
            ConsultationType::InPerson => self.in_person,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub avatar: String,
    pub specialization: String,
    pub rating: f32,
    pub review_count: u32,
    pub experience_years: u32,
    pub facility_id: FacilityId,
    pub locality: String,
    pub consultation_fee: f64,
    pub capabilities: Capabilities,
    pub next_available: NaiveDate,
    pub languages: Vec<String>,
    pub education: String,
    pub treatable_symptoms: BTreeSet<Symptom>,
    pub available_time_slots: Vec<String>,
}

impl Provider {
    pub fn treats(&self, symptom: Symptom) -> bool {
        self.treatable_symptoms.contains(&symptom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub locality: String,
    pub address: String,
    pub phone: String,
    pub rating: f32,
    pub review_count: u32,
    pub emergency_capable: bool,
    pub specialties: Vec<String>,
    pub bed_count: u32,
    pub doctor_count: u32,
    pub established_year: i32,
    pub image: String,
}

/// A search hit joined with the facility summary shown on result cards.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderListing {
    pub provider: Provider,
    pub facility_name: String,
    pub facility_rating: f32,
    pub facility_review_count: u32,
}

// ==============================================================================
// CATALOG RECORDS (INGESTION FORM)
// ==============================================================================

/// Provider as supplied by a catalog source, numeric fields still free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: ProviderId,
    pub name: String,
    pub specialization: String,
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    pub experience: String,
    pub hospital_id: FacilityId,
    pub location: String,
    #[serde(default)]
    pub avatar: String,
    pub consultation_fee: f64,
    pub teleconsultation: bool,
    pub in_person: bool,
    pub next_available: NaiveDate,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub time_slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: FacilityId,
    pub name: String,
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    pub location: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub emergency: bool,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub image: String,
    pub established: String,
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub doctors: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecords {
    #[serde(alias = "doctors")]
    pub providers: Vec<ProviderRecord>,
    #[serde(alias = "hospitals")]
    pub facilities: Vec<FacilityRecord>,
}

/// A catalog field that could not be read and was replaced by a default.
/// Logged and kept on the catalog, never returned as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedCatalogData {
    pub record: String,
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for MalformedCatalogData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed {} '{}' on {}", self.field, self.value, self.record)
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error("Facility {0} not found")]
    FacilityNotFound(FacilityId),

    #[error("Provider {0} not found")]
    ProviderNotFound(ProviderId),

    #[error("Provider {provider_id} references unknown facility {facility_id}")]
    DanglingFacility {
        provider_id: ProviderId,
        facility_id: FacilityId,
    },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("Unknown body part: {0}")]
    UnknownBodyPart(String),

    #[error("Unknown consultation type: {0}")]
    UnknownConsultationType(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Catalog source error: {0}")]
    CatalogSource(String),
}
