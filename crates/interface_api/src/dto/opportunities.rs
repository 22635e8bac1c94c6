//! Opportunity DTOs

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchOpportunitiesRequest {
    #[validate(length(min = 1))]
    pub query: String,
    /// Searched field; defaults to the opportunity name
    pub field: Option<String>,
    /// Optional equality filter on the sales stage
    pub sales_stage: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOpportunityRequest {
    #[validate(length(min = 1))]
    pub opportunity_id: String,
    pub opportunity_data: Map<String, Value>,
}
