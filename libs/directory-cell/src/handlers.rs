use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    ConsultationType, DirectoryError, FacilityId, ProviderId, ProviderQuery, SortBy, Symptom,
};
use crate::services::{resolve_complaint, BodyPart, ProviderDirectory};

// Query parameters arrive as plain strings so that empty values and sentinels
// are handled the same way the kiosk's dropdowns send them.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderSearchParams {
    pub text: Option<String>,
    pub symptom: Option<String>,
    pub locality: Option<String>,
    pub consultation_type: Option<String>,
    pub sort_by: Option<String>,
}

impl ProviderSearchParams {
    pub fn into_query(self) -> Result<ProviderQuery, DirectoryError> {
        let consultation_type = match self.consultation_type.as_deref() {
            Some(raw) => raw.parse::<ConsultationType>()?,
            None => ConsultationType::Both,
        };

        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SortBy>()?),
        };

        Ok(ProviderQuery {
            text: self.text.unwrap_or_default(),
            symptom: self.symptom,
            locality: self.locality,
            consultation_type,
            sort_by,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveComplaintParams {
    pub label: String,
}

// ==============================================================================
// PROVIDER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn search_providers(
    State(directory): State<Arc<ProviderDirectory>>,
    Query(params): Query<ProviderSearchParams>,
) -> Result<Json<Value>, AppError> {
    let query = params.into_query().map_err(directory_error)?;

    let listings = directory.listings(&query);

    Ok(Json(json!({
        "providers": listings,
        "total": listings.len()
    })))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(directory): State<Arc<ProviderDirectory>>,
    Path(provider_id): Path<ProviderId>,
) -> Result<Json<Value>, AppError> {
    let provider = directory.get_provider(provider_id).map_err(directory_error)?;
    let facility = directory.facility_of(provider).map_err(directory_error)?;

    Ok(Json(json!({
        "provider": provider,
        "facility": facility
    })))
}

// ==============================================================================
// FACILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_facility(
    State(directory): State<Arc<ProviderDirectory>>,
    Path(facility_id): Path<FacilityId>,
) -> Result<Json<Value>, AppError> {
    let facility = directory.get_facility(facility_id).map_err(directory_error)?;

    Ok(Json(json!(facility)))
}

#[axum::debug_handler]
pub async fn get_facility_providers(
    State(directory): State<Arc<ProviderDirectory>>,
    Path(facility_id): Path<FacilityId>,
) -> Result<Json<Value>, AppError> {
    directory.get_facility(facility_id).map_err(directory_error)?;

    let providers = directory.providers_at(facility_id);

    Ok(Json(json!({
        "providers": providers,
        "facility_id": facility_id,
        "total": providers.len()
    })))
}

#[axum::debug_handler]
pub async fn list_localities(
    State(directory): State<Arc<ProviderDirectory>>,
) -> Result<Json<Value>, AppError> {
    let localities = directory.localities();

    Ok(Json(json!({
        "localities": localities,
        "total": localities.len()
    })))
}

// ==============================================================================
// SYMPTOM VOCABULARY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_symptoms() -> Result<Json<Value>, AppError> {
    let symptoms: Vec<Value> = Symptom::ALL
        .iter()
        .map(|symptom| json!({ "tag": symptom, "label": symptom.label() }))
        .collect();

    Ok(Json(json!({
        "symptoms": symptoms,
        "total": symptoms.len()
    })))
}

#[axum::debug_handler]
pub async fn list_body_parts() -> Result<Json<Value>, AppError> {
    let body_parts: Vec<Value> = BodyPart::ALL
        .iter()
        .map(|part| {
            json!({
                "tag": part,
                "label": part.label(),
                "complaints": part.complaints()
            })
        })
        .collect();

    Ok(Json(json!({
        "body_parts": body_parts,
        "total": body_parts.len()
    })))
}

#[axum::debug_handler]
pub async fn resolve_symptom(
    Query(params): Query<ResolveComplaintParams>,
) -> Result<Json<Value>, AppError> {
    let symptom = resolve_complaint(&params.label)
        .ok_or_else(|| AppError::NotFound(format!("No symptom matches '{}'", params.label)))?;

    Ok(Json(json!({
        "label": params.label,
        "symptom": symptom
    })))
}

fn directory_error(err: DirectoryError) -> AppError {
    match err {
        DirectoryError::FacilityNotFound(_) | DirectoryError::ProviderNotFound(_) => {
            AppError::NotFound(err.to_string())
        }
        DirectoryError::UnknownSymptom(_)
        | DirectoryError::UnknownBodyPart(_)
        | DirectoryError::UnknownConsultationType(_)
        | DirectoryError::UnknownSortKey(_) => AppError::BadRequest(err.to_string()),
        DirectoryError::DanglingFacility { .. }
        | DirectoryError::DuplicateId { .. }
        | DirectoryError::CatalogSource(_) => AppError::Internal(err.to_string()),
    }
}
