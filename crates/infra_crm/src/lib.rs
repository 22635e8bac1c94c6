//! CRM Session Adapter
//!
//! This crate owns the outbound side of the bridge: it holds exactly one
//! session token per client instance, performs login when the token is
//! absent, and executes named remote operations by serializing parameters
//! into the legacy REST envelope.
//!
//! # Architecture
//!
//! - `config`: connection settings; remote URL and credentials are mandatory
//! - `hash`: the injected credential digest strategy
//! - `protocol`: the v4.1 wire envelope and per-operation `rest_data` shapes
//! - `session`: the session validity state machine and single-flight guard
//! - `client`: `SuiteCrmClient`, the reqwest-based adapter implementing
//!   [`crm_core::CrmPort`]
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_crm::{CrmConfig, SuiteCrmClient};
//! use crm_core::{CrmModule, CrmPort, SearchFilter};
//!
//! let client = SuiteCrmClient::new(CrmConfig::from_env()?)?;
//! let hits = client.search(SearchFilter::new(CrmModule::Leads, "555")).await?;
//! ```

pub mod client;
pub mod config;
pub mod hash;
pub mod operations;
pub mod protocol;
pub mod session;

pub use client::SuiteCrmClient;
pub use config::CrmConfig;
pub use hash::PasswordHash;
pub use session::{SessionState, SessionStore};
