//! Error types for CRM operations
//!
//! Provides a unified error type that both the session adapter and the
//! transport shell use, so every failure mode of a remote call has exactly
//! one representation:
//!
//! - `Authentication` — the login response carried no session identifier
//! - `Transport` — the outbound HTTP call did not complete with a success
//!   status, or a network-level failure occurred
//! - `Remote` — the remote returned a structurally valid fault body
//! - `Configuration` — required settings are missing or invalid
//! - `InvalidInput` — a caller-supplied field name or payload was rejected
//!   before any request was sent

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error type for CRM bridge operations
#[derive(Debug, Error)]
pub enum CrmError {
    /// Login was attempted but the remote response lacked a session id
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The outbound request failed at the HTTP or network level
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote returned an application-level fault body
    #[error(transparent)]
    Remote(RemoteFault),

    /// Required configuration is missing or invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Caller input was rejected before any request was sent
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CrmError {
    pub fn authentication(message: impl Into<String>) -> Self {
        CrmError::Authentication { message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        CrmError::Transport { message: message.into(), source: None }
    }

    /// Creates a transport error wrapping an underlying cause
    pub fn transport_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CrmError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CrmError::Configuration { message: message.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CrmError::InvalidInput { message: message.into() }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, CrmError::Authentication { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, CrmError::Transport { .. })
    }

    /// Returns the remote fault if this error carries one
    pub fn as_remote_fault(&self) -> Option<&RemoteFault> {
        match self {
            CrmError::Remote(fault) => Some(fault),
            _ => None,
        }
    }
}

/// Application-level fault returned by the legacy REST endpoint
///
/// The v4.1 protocol reports failures inside an HTTP 200 response as a JSON
/// object carrying `name`, `number`, and `description`. The adapter detects
/// this shape and surfaces it distinctly from success payloads.
#[derive(Debug, Clone, PartialEq, Deserialize, Error)]
#[error("Remote fault {number} ({name}): {description}")]
pub struct RemoteFault {
    pub name: String,
    pub number: i64,
    pub description: String,
}

impl RemoteFault {
    /// Fault number the server uses for a rejected session id
    pub const INVALID_SESSION: i64 = 11;

    /// Detects the fault shape in a decoded response body
    ///
    /// Success payloads (`id`, `entry_list`, ...) never carry all three
    /// fault keys at the top level, so presence of the full triple is the
    /// discriminator.
    pub fn from_response(body: &Value) -> Option<Self> {
        let obj = body.as_object()?;
        let name = obj.get("name")?.as_str()?;
        let number = obj.get("number")?.as_i64()?;
        let description = obj.get("description")?.as_str()?;
        Some(RemoteFault {
            name: name.to_string(),
            number,
            description: description.to_string(),
        })
    }

    /// True when the fault indicates the session token was rejected
    pub fn is_invalid_session(&self) -> bool {
        self.number == Self::INVALID_SESSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fault_detected_in_fault_body() {
        let body = json!({
            "name": "Invalid Session ID",
            "number": 11,
            "description": "The session ID is invalid"
        });
        let fault = RemoteFault::from_response(&body).unwrap();
        assert!(fault.is_invalid_session());
        assert_eq!(fault.name, "Invalid Session ID");
    }

    #[test]
    fn test_fault_not_detected_in_success_bodies() {
        let login = json!({"id": "abc123", "module_name": "Users"});
        assert!(RemoteFault::from_response(&login).is_none());

        let entry_list = json!({
            "result_count": 1,
            "entry_list": [{"id": "1", "name_value_list": {}}]
        });
        assert!(RemoteFault::from_response(&entry_list).is_none());

        // A record that happens to have a "name" field is not a fault
        let record = json!({"id": "1", "name": "Acme"});
        assert!(RemoteFault::from_response(&record).is_none());
    }

    #[test]
    fn test_remote_fault_display() {
        let err = CrmError::Remote(RemoteFault {
            name: "Module Does Not Exist".to_string(),
            number: 20,
            description: "The module name is invalid".to_string(),
        });
        let rendered = err.to_string();
        assert!(rendered.contains("20"));
        assert!(rendered.contains("Module Does Not Exist"));
    }

    #[test]
    fn test_transport_source_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CrmError::transport_from("connect failed", io);
        assert!(err.is_transport());
        assert!(std::error::Error::source(&err).is_some());
    }
}
