//! Credential digest strategy
//!
//! The login payload carries a hashed password. Which digest the server
//! expects varies between deployments, so the strategy is selected by
//! configuration and injected into the login path rather than hardcoded.

use serde::Deserialize;
use sha2::{Digest, Sha256};

/// One-way transform applied to the password before it is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordHash {
    /// Pass the password through unchanged, for servers that accept cleartext
    Plain,
    /// Lowercase hex SHA-256 digest
    #[default]
    Sha256,
}

impl PasswordHash {
    /// Applies the strategy to a raw password
    pub fn digest(&self, password: &str) -> String {
        match self {
            PasswordHash::Plain => password.to_string(),
            PasswordHash::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(password.as_bytes());
                format!("{:x}", hasher.finalize())
            }
        }
    }
}
