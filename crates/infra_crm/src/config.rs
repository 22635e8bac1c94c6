//! Adapter configuration
//!
//! The remote endpoint URL, username, and password have no defaults and
//! must come from external configuration; construction fails without them.

use serde::Deserialize;

use crate::hash::PasswordHash;

/// Connection settings for the remote CRM
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    /// Full URL of the REST endpoint (`.../service/v4_1/rest.php`)
    pub url: String,
    /// Login user name
    pub username: String,
    /// Login password, hashed per `password_hash` before it is sent
    pub password: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Credential digest applied to the password at login
    #[serde(default)]
    pub password_hash: PasswordHash,
    /// Application name sent with the login payload
    #[serde(default = "default_application_name")]
    pub application_name: String,
    /// Fixed result cap for list operations
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_application_name() -> String {
    "RestTest".to_string()
}

fn default_max_results() -> u32 {
    10
}

impl CrmConfig {
    /// Creates a config with the mandatory settings and defaults for the rest
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            timeout_secs: default_timeout_secs(),
            password_hash: PasswordHash::default(),
            application_name: default_application_name(),
            max_results: default_max_results(),
        }
    }

    /// Loads configuration from `CRM_`-prefixed environment variables
    ///
    /// Fails when `CRM_URL`, `CRM_USERNAME`, or `CRM_PASSWORD` is absent.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CRM"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_overrides(pairs: &[(&str, &str)]) -> Result<CrmConfig, config::ConfigError> {
        let mut builder = config::Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()?.try_deserialize()
    }

    #[test]
    fn test_mandatory_settings_have_no_defaults() {
        let missing_password = from_overrides(&[
            ("url", "http://crm.local/service/v4_1/rest.php"),
            ("username", "admin"),
        ]);
        assert!(missing_password.is_err());
    }

    #[test]
    fn test_optional_settings_default() {
        let config = from_overrides(&[
            ("url", "http://crm.local/service/v4_1/rest.php"),
            ("username", "admin"),
            ("password", "secret"),
        ])
        .unwrap();

        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.application_name, "RestTest");
        assert_eq!(config.password_hash, PasswordHash::Sha256);
    }

    #[test]
    fn test_password_hash_selectable() {
        let config = from_overrides(&[
            ("url", "http://crm.local/service/v4_1/rest.php"),
            ("username", "admin"),
            ("password", "secret"),
            ("password_hash", "plain"),
        ])
        .unwrap();

        assert_eq!(config.password_hash, PasswordHash::Plain);
    }
}
