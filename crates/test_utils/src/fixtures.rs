//! Pre-built Test Fixtures
//!
//! Ready-to-use field maps for each entity type, consistent and predictable
//! across the test suite.

use serde_json::{json, Map, Value};

/// Fixture payloads for record creation
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// A contact with a distinctive mobile number
    pub fn contact() -> Map<String, Value> {
        object(json!({
            "first_name": "Dana",
            "last_name": "Reeve",
            "email1": "dana.reeve@example.com",
            "phone_mobile": "555-0142",
        }))
    }

    /// A fresh lead in status New
    pub fn lead() -> Map<String, Value> {
        object(json!({
            "first_name": "Sam",
            "last_name": "Okafor",
            "email1": "sam.okafor@example.com",
            "phone_mobile": "555-0187",
            "status": "New",
            "lead_source": "Web Site",
        }))
    }

    /// A customer account
    pub fn account() -> Map<String, Value> {
        object(json!({
            "name": "Helios Manufacturing",
            "account_type": "Customer",
            "industry": "Manufacturing",
            "phone_office": "555-0100",
            "billing_address_city": "Springfield",
        }))
    }

    /// An open opportunity
    pub fn opportunity() -> Map<String, Value> {
        object(json!({
            "name": "Helios renewal 2026",
            "amount": "48000",
            "sales_stage": "Proposal/Price Quote",
            "date_closed": "2026-11-30",
        }))
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("fixture literals are objects"),
    }
}
