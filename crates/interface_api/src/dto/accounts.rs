//! Account DTOs

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchAccountsRequest {
    #[validate(length(min = 1))]
    pub query: String,
    /// Searched field; defaults to the account name
    pub field: Option<String>,
    /// Optional equality filter on the account type
    pub account_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1))]
    pub account_id: String,
    pub account_data: Map<String, Value>,
}
