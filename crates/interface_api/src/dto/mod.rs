//! Request DTOs
//!
//! Shapes match the original bridge contract per entity; field names like
//! `lead_id`/`lead_data` are part of that contract.

pub mod accounts;
pub mod contacts;
pub mod leads;
pub mod opportunities;
