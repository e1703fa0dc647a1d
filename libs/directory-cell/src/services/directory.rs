// libs/directory-cell/src/services/directory.rs
use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{
    DirectoryError, Facility, FacilityId, Provider, ProviderId, ProviderListing, ProviderQuery,
    SortBy, Symptom,
};
use crate::services::catalog::{Catalog, CatalogSource};

const ALL_SYMPTOMS: [&str; 2] = ["all", "all-symptoms"];
const ALL_LOCATIONS: [&str; 2] = ["all", "all-locations"];

/// Read-only view over a catalog snapshot. Cheap to clone and share between handlers.
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    catalog: Arc<Catalog>,
}

enum SymptomFilter {
    Any,
    Only(Symptom),
    Nothing,
}

enum LocalityFilter<'q> {
    Any,
    Only(&'q str),
}

impl ProviderDirectory {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_source(source: &dyn CatalogSource) -> Result<Self, DirectoryError> {
        let records = source
            .load()
            .map_err(|e| DirectoryError::CatalogSource(format!("{:#}", e)))?;

        let catalog = Catalog::ingest(records)?;

        info!(
            "Loaded {} providers and {} facilities from {} ({} warnings)",
            catalog.providers().len(),
            catalog.facilities().len(),
            source.describe(),
            catalog.warnings().len()
        );

        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Filter providers by every criterion in `query` and order them by its sort key.
    pub fn search(&self, query: &ProviderQuery) -> Vec<&Provider> {
        let needle = query.text.trim().to_lowercase();
        let symptom = symptom_filter(query.symptom.as_deref());
        let locality = locality_filter(query.locality.as_deref());

        let mut results: Vec<&Provider> = self
            .catalog
            .providers()
            .iter()
            .filter(|provider| self.matches_text(provider, &needle))
            .filter(|provider| match symptom {
                SymptomFilter::Any => true,
                SymptomFilter::Only(s) => provider.treats(s),
                SymptomFilter::Nothing => false,
            })
            .filter(|provider| match locality {
                LocalityFilter::Any => true,
                LocalityFilter::Only(name) => provider.locality == name,
            })
            .filter(|provider| provider.capabilities.supports(query.consultation_type))
            .collect();

        if let Some(sort_by) = query.sort_by {
            results.sort_by(|a, b| compare_by(sort_by, a, b));
        }

        debug!("Provider search matched {} of {}", results.len(), self.catalog.providers().len());

        results
    }

    /// Search results joined with the facility summary shown on result cards.
    pub fn listings(&self, query: &ProviderQuery) -> Vec<ProviderListing> {
        self.search(query)
            .into_iter()
            .filter_map(|provider| {
                let facility = self.catalog.facility(provider.facility_id)?;
                Some(ProviderListing {
                    provider: provider.clone(),
                    facility_name: facility.name.clone(),
                    facility_rating: facility.rating,
                    facility_review_count: facility.review_count,
                })
            })
            .collect()
    }

    pub fn get_facility(&self, id: FacilityId) -> Result<&Facility, DirectoryError> {
        self.catalog
            .facility(id)
            .ok_or(DirectoryError::FacilityNotFound(id))
    }

    pub fn get_provider(&self, id: ProviderId) -> Result<&Provider, DirectoryError> {
        self.catalog
            .provider(id)
            .ok_or(DirectoryError::ProviderNotFound(id))
    }

    pub fn facility_of(&self, provider: &Provider) -> Result<&Facility, DirectoryError> {
        self.get_facility(provider.facility_id)
    }

    /// Providers practicing at a facility, in catalog order.
    pub fn providers_at(&self, facility_id: FacilityId) -> Vec<&Provider> {
        self.catalog
            .providers()
            .iter()
            .filter(|provider| provider.facility_id == facility_id)
            .collect()
    }

    /// Distinct provider localities in the order they first appear.
    pub fn localities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for provider in self.catalog.providers() {
            if !seen.contains(&provider.locality.as_str()) {
                seen.push(&provider.locality);
            }
        }
        seen
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    fn matches_text(&self, provider: &Provider, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        if provider.name.to_lowercase().contains(needle)
            || provider.specialization.to_lowercase().contains(needle)
        {
            return true;
        }

        self.catalog
            .facility(provider.facility_id)
            .is_some_and(|facility| facility.name.to_lowercase().contains(needle))
    }
}

fn symptom_filter(tag: Option<&str>) -> SymptomFilter {
    let tag = match tag.map(str::trim) {
        None | Some("") => return SymptomFilter::Any,
        Some(tag) => tag,
    };

    if ALL_SYMPTOMS.iter().any(|sentinel| tag.eq_ignore_ascii_case(sentinel)) {
        return SymptomFilter::Any;
    }

    match tag.parse::<Symptom>() {
        Ok(symptom) => SymptomFilter::Only(symptom),
        Err(_) => SymptomFilter::Nothing,
    }
}

fn locality_filter(locality: Option<&str>) -> LocalityFilter<'_> {
    match locality.map(str::trim) {
        None | Some("") => LocalityFilter::Any,
        Some(name) if ALL_LOCATIONS.iter().any(|s| name.eq_ignore_ascii_case(s)) => {
            LocalityFilter::Any
        }
        Some(name) => LocalityFilter::Only(name),
    }
}

fn compare_by(sort_by: SortBy, a: &Provider, b: &Provider) -> Ordering {
    match sort_by {
        SortBy::Rating => b.rating.total_cmp(&a.rating),
        SortBy::Experience => b.experience_years.cmp(&a.experience_years),
        SortBy::Fee => a.consultation_fee.total_cmp(&b.consultation_fee),
    }
}
