//! Contact handlers

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use validator::Validate;

use crm_core::{CrmModule, FieldValues, RecordId, SearchFilter};

use crate::dto::contacts::{SearchContactsRequest, UpdateContactRequest};
use crate::error::ApiError;
use crate::AppState;

/// Searches contacts by substring match
pub async fn search_contacts(
    State(state): State<AppState>,
    Json(request): Json<SearchContactsRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    let filter = match &request.field {
        Some(field) => SearchFilter::with_field(CrmModule::Contacts, field, &request.query)?,
        None => SearchFilter::new(CrmModule::Contacts, &request.query),
    };
    Ok(Json(state.crm.search(filter).await?))
}

/// Creates a contact from the posted field map
pub async fn create_contact(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    super::require_fields(&fields, "contact")?;
    let result = state
        .crm
        .create(CrmModule::Contacts, FieldValues::from_map(fields))
        .await?;
    Ok(Json(result))
}

/// Updates an existing contact
pub async fn update_contact(
    State(state): State<AppState>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    super::require_fields(&request.contact_data, "contact")?;
    let result = state
        .crm
        .update(
            CrmModule::Contacts,
            RecordId::from(request.contact_id),
            FieldValues::from_map(request.contact_data),
        )
        .await?;
    Ok(Json(result))
}
