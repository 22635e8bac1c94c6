//! Lead handlers

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use validator::Validate;

use crm_core::{CrmModule, FieldValues, RecordId, SearchFilter};

use crate::dto::leads::{ConvertLeadRequest, SearchLeadsRequest, UpdateLeadRequest};
use crate::error::ApiError;
use crate::AppState;

/// Searches leads by substring match, optionally narrowed by status
pub async fn search_leads(
    State(state): State<AppState>,
    Json(request): Json<SearchLeadsRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    let mut filter = match &request.field {
        Some(field) => SearchFilter::with_field(CrmModule::Leads, field, &request.query)?,
        None => SearchFilter::new(CrmModule::Leads, &request.query),
    };
    if let Some(status) = &request.status {
        filter = filter.and_equals("status", status)?;
    }
    Ok(Json(state.crm.search(filter).await?))
}

/// Creates a lead from the posted field map
pub async fn create_lead(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    super::require_fields(&fields, "lead")?;
    let result = state
        .crm
        .create(CrmModule::Leads, FieldValues::from_map(fields))
        .await?;
    Ok(Json(result))
}

/// Updates an existing lead
pub async fn update_lead(
    State(state): State<AppState>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    super::require_fields(&request.lead_data, "lead")?;
    let result = state
        .crm
        .update(
            CrmModule::Leads,
            RecordId::from(request.lead_id),
            FieldValues::from_map(request.lead_data),
        )
        .await?;
    Ok(Json(result))
}

/// Converts a lead into downstream records
pub async fn convert_lead(
    State(state): State<AppState>,
    Json(request): Json<ConvertLeadRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    let result = state.crm.convert_lead(RecordId::from(request.lead_id)).await?;
    Ok(Json(result))
}
