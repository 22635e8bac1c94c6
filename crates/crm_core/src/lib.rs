//! Core types for the CRM bridge
//!
//! This crate provides the building blocks shared by the transport shell and
//! the session adapter:
//! - The `CrmError` taxonomy and remote fault detection
//! - The catalogue of supported CRM modules and their field lists
//! - Search filter construction with query-literal escaping
//! - Ordered name/value payloads for create and update operations
//! - The `CrmPort` trait, the seam between the HTTP shell and the adapter

pub mod error;
pub mod module;
pub mod ports;
pub mod query;
pub mod record;

pub use error::{CrmError, RemoteFault};
pub use module::CrmModule;
pub use ports::CrmPort;
pub use query::SearchFilter;
pub use record::{FieldValues, NameValue, RecordId, SessionToken};
