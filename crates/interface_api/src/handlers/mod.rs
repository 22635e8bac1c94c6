//! Request handlers

use serde_json::{Map, Value};

use crate::error::ApiError;

pub mod accounts;
pub mod contacts;
pub mod health;
pub mod leads;
pub mod opportunities;

pub(crate) fn require_fields(fields: &Map<String, Value>, entity: &str) -> Result<(), ApiError> {
    if fields.is_empty() {
        return Err(ApiError::Validation(format!("{entity} field map is empty")));
    }
    Ok(())
}
