//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the CRM bridge test suite.
//!
//! # Modules
//!
//! - `stub_crm`: an in-process stub of the legacy REST endpoint with call
//!   recording and scripted failure modes
//! - `fixtures`: sample per-entity payloads

pub mod fixtures;
pub mod stub_crm;

pub use fixtures::*;
pub use stub_crm::*;
