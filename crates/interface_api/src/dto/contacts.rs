//! Contact DTOs

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchContactsRequest {
    #[validate(length(min = 1))]
    pub query: String,
    /// Searched field; defaults to the contact mobile number
    pub field: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1))]
    pub contact_id: String,
    pub contact_data: Map<String, Value>,
}
