//! Account handlers

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use validator::Validate;

use crm_core::{CrmModule, FieldValues, RecordId, SearchFilter};

use crate::dto::accounts::{SearchAccountsRequest, UpdateAccountRequest};
use crate::error::ApiError;
use crate::AppState;

/// Searches accounts by substring match, optionally narrowed by type
pub async fn search_accounts(
    State(state): State<AppState>,
    Json(request): Json<SearchAccountsRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    let mut filter = match &request.field {
        Some(field) => SearchFilter::with_field(CrmModule::Accounts, field, &request.query)?,
        None => SearchFilter::new(CrmModule::Accounts, &request.query),
    };
    if let Some(account_type) = &request.account_type {
        filter = filter.and_equals("account_type", account_type)?;
    }
    Ok(Json(state.crm.search(filter).await?))
}

/// Creates an account from the posted field map
pub async fn create_account(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    super::require_fields(&fields, "account")?;
    let result = state
        .crm
        .create(CrmModule::Accounts, FieldValues::from_map(fields))
        .await?;
    Ok(Json(result))
}

/// Updates an existing account
pub async fn update_account(
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    super::require_fields(&request.account_data, "account")?;
    let result = state
        .crm
        .update(
            CrmModule::Accounts,
            RecordId::from(request.account_id),
            FieldValues::from_map(request.account_data),
        )
        .await?;
    Ok(Json(result))
}
