//! Lead DTOs

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchLeadsRequest {
    #[validate(length(min = 1))]
    pub query: String,
    /// Searched field; defaults to the lead mobile number
    pub field: Option<String>,
    /// Optional equality filter on the lead status
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(length(min = 1))]
    pub lead_id: String,
    pub lead_data: Map<String, Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConvertLeadRequest {
    #[validate(length(min = 1))]
    pub lead_id: String,
}
