//! Supported CRM modules
//!
//! The bridge exposes a fixed set of four remote record types. Each module
//! carries its remote module name, the table prefix used in query
//! expressions, the default field searched when the caller does not name
//! one, and the fixed list of fields returned by list operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four supported remote record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrmModule {
    Contacts,
    Leads,
    Accounts,
    Opportunities,
}

impl CrmModule {
    pub const ALL: [CrmModule; 4] = [
        CrmModule::Contacts,
        CrmModule::Leads,
        CrmModule::Accounts,
        CrmModule::Opportunities,
    ];

    /// Remote module name as the API expects it
    pub fn name(&self) -> &'static str {
        match self {
            CrmModule::Contacts => "Contacts",
            CrmModule::Leads => "Leads",
            CrmModule::Accounts => "Accounts",
            CrmModule::Opportunities => "Opportunities",
        }
    }

    /// Table prefix used in query expressions (`leads.status = ...`)
    pub fn table(&self) -> &'static str {
        match self {
            CrmModule::Contacts => "contacts",
            CrmModule::Leads => "leads",
            CrmModule::Accounts => "accounts",
            CrmModule::Opportunities => "opportunities",
        }
    }

    /// Field searched when the caller does not name one
    pub fn default_search_field(&self) -> &'static str {
        match self {
            CrmModule::Contacts | CrmModule::Leads => "phone_mobile",
            CrmModule::Accounts | CrmModule::Opportunities => "name",
        }
    }

    /// Fixed list of fields returned by list operations for this module
    pub fn select_fields(&self) -> &'static [&'static str] {
        match self {
            CrmModule::Contacts => {
                &["id", "first_name", "last_name", "email1", "phone_mobile"]
            }
            CrmModule::Leads => &[
                "id",
                "first_name",
                "last_name",
                "email1",
                "phone_mobile",
                "status",
                "lead_source",
                "description",
            ],
            CrmModule::Accounts => &[
                "id",
                "name",
                "account_type",
                "industry",
                "annual_revenue",
                "phone_office",
                "email1",
                "billing_address_street",
                "billing_address_city",
                "billing_address_state",
                "billing_address_country",
            ],
            CrmModule::Opportunities => &[
                "id",
                "name",
                "amount",
                "sales_stage",
                "probability",
                "date_closed",
                "next_step",
                "lead_source",
                "description",
            ],
        }
    }
}

impl fmt::Display for CrmModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names_match_remote_casing() {
        assert_eq!(CrmModule::Contacts.name(), "Contacts");
        assert_eq!(CrmModule::Opportunities.table(), "opportunities");
    }

    #[test]
    fn test_default_search_fields() {
        assert_eq!(CrmModule::Contacts.default_search_field(), "phone_mobile");
        assert_eq!(CrmModule::Leads.default_search_field(), "phone_mobile");
        assert_eq!(CrmModule::Accounts.default_search_field(), "name");
        assert_eq!(CrmModule::Opportunities.default_search_field(), "name");
    }

    #[test]
    fn test_select_fields_always_include_id() {
        for module in CrmModule::ALL {
            assert_eq!(module.select_fields()[0], "id");
        }
    }
}
