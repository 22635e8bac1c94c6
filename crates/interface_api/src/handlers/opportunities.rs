//! Opportunity handlers

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use validator::Validate;

use crm_core::{CrmModule, FieldValues, RecordId, SearchFilter};

use crate::dto::opportunities::{SearchOpportunitiesRequest, UpdateOpportunityRequest};
use crate::error::ApiError;
use crate::AppState;

/// Searches opportunities by substring match, optionally narrowed by stage
pub async fn search_opportunities(
    State(state): State<AppState>,
    Json(request): Json<SearchOpportunitiesRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    let mut filter = match &request.field {
        Some(field) => {
            SearchFilter::with_field(CrmModule::Opportunities, field, &request.query)?
        }
        None => SearchFilter::new(CrmModule::Opportunities, &request.query),
    };
    if let Some(sales_stage) = &request.sales_stage {
        filter = filter.and_equals("sales_stage", sales_stage)?;
    }
    Ok(Json(state.crm.search(filter).await?))
}

/// Creates an opportunity from the posted field map
pub async fn create_opportunity(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    super::require_fields(&fields, "opportunity")?;
    let result = state
        .crm
        .create(CrmModule::Opportunities, FieldValues::from_map(fields))
        .await?;
    Ok(Json(result))
}

/// Updates an existing opportunity
pub async fn update_opportunity(
    State(state): State<AppState>,
    Json(request): Json<UpdateOpportunityRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;
    super::require_fields(&request.opportunity_data, "opportunity")?;
    let result = state
        .crm
        .update(
            CrmModule::Opportunities,
            RecordId::from(request.opportunity_id),
            FieldValues::from_map(request.opportunity_data),
        )
        .await?;
    Ok(Json(result))
}
