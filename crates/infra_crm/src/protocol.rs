//! Wire protocol for the legacy REST endpoint
//!
//! Every operation is an HTTP POST to the single endpoint with an
//! `application/x-www-form-urlencoded` body of exactly four fields:
//! `method`, `input_type`, `response_type`, and `rest_data` (the JSON-encoded
//! parameter object). These shapes must be preserved bit-exact for
//! compatibility with existing servers.

use serde::Serialize;

use crm_core::NameValue;

pub const INPUT_TYPE: &str = "JSON";
pub const RESPONSE_TYPE: &str = "JSON";
pub const USER_AUTH_VERSION: &str = "1";

/// Remote operation names
pub mod methods {
    pub const LOGIN: &str = "login";
    pub const GET_ENTRY_LIST: &str = "get_entry_list";
    pub const SET_ENTRY: &str = "set_entry";
    pub const CONVERT_LEAD: &str = "convert_lead";
}

/// Form body of a request: the four fields and nothing else
#[derive(Debug, Clone, Serialize)]
pub struct RestEnvelope {
    pub method: String,
    pub input_type: &'static str,
    pub response_type: &'static str,
    pub rest_data: String,
}

impl RestEnvelope {
    /// Wraps a parameter object into the form envelope
    pub fn new(
        method: &str,
        rest_data: &(impl Serialize + ?Sized),
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: method.to_string(),
            input_type: INPUT_TYPE,
            response_type: RESPONSE_TYPE,
            rest_data: serde_json::to_string(rest_data)?,
        })
    }
}

/// Credential block inside the login parameters
#[derive(Debug, Serialize)]
pub struct UserAuth<'a> {
    pub user_name: &'a str,
    pub password: String,
    pub version: &'static str,
}

/// `rest_data` for `login`
#[derive(Debug, Serialize)]
pub struct LoginArgs<'a> {
    pub user_auth: UserAuth<'a>,
    pub application_name: &'a str,
    pub name_value_list: Vec<NameValue>,
}

/// `rest_data` for `get_entry_list`
#[derive(Debug, Serialize)]
pub struct ListArgs<'a> {
    pub session: &'a str,
    pub module_name: &'a str,
    pub query: String,
    pub select_fields: &'static [&'static str],
    pub max_results: u32,
}

/// `rest_data` for `set_entry`; an update prepends the record id pair
#[derive(Debug, Serialize)]
pub struct SetArgs<'a> {
    pub session: &'a str,
    pub module_name: &'a str,
    pub name_value_list: &'a [NameValue],
}

/// `rest_data` for `convert_lead`; nothing beyond the lead identifier
#[derive(Debug, Serialize)]
pub struct ConvertArgs<'a> {
    pub session: &'a str,
    pub id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_envelope_carries_exactly_four_fields() {
        let envelope = RestEnvelope::new(methods::LOGIN, &json!({})).unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["method"], "login");
        assert_eq!(obj["input_type"], "JSON");
        assert_eq!(obj["response_type"], "JSON");
        assert!(obj["rest_data"].is_string());
    }

    #[test]
    fn test_login_rest_data_shape() {
        let args = LoginArgs {
            user_auth: UserAuth {
                user_name: "admin",
                password: "hashed".to_string(),
                version: USER_AUTH_VERSION,
            },
            application_name: "RestTest",
            name_value_list: Vec::new(),
        };

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({
                "user_auth": {
                    "user_name": "admin",
                    "password": "hashed",
                    "version": "1"
                },
                "application_name": "RestTest",
                "name_value_list": []
            })
        );
    }

    #[test]
    fn test_list_rest_data_shape() {
        let args = ListArgs {
            session: "abc123",
            module_name: "Leads",
            query: "leads.phone_mobile LIKE '%555%'".to_string(),
            select_fields: crm_core::CrmModule::Contacts.select_fields(),
            max_results: 10,
        };
        let value = serde_json::to_value(&args).unwrap();

        assert_eq!(value["session"], "abc123");
        assert_eq!(value["max_results"], 10);
        assert_eq!(
            value["select_fields"],
            json!(["id", "first_name", "last_name", "email1", "phone_mobile"])
        );
    }

    #[test]
    fn test_set_rest_data_preserves_pair_order() {
        let pairs = vec![
            NameValue::new("id", "42"),
            NameValue::new("name", "X"),
        ];
        let args = SetArgs {
            session: "abc123",
            module_name: "Leads",
            name_value_list: &pairs,
        };
        let value = serde_json::to_value(&args).unwrap();

        assert_eq!(
            value["name_value_list"],
            json!([
                {"name": "id", "value": "42"},
                {"name": "name", "value": "X"}
            ])
        );
    }

    #[test]
    fn test_rest_data_is_a_json_encoded_string() {
        let envelope = RestEnvelope::new(
            methods::CONVERT_LEAD,
            &ConvertArgs { session: "abc123", id: "7" },
        )
        .unwrap();

        let decoded: Value = serde_json::from_str(&envelope.rest_data).unwrap();
        assert_eq!(decoded, json!({"session": "abc123", "id": "7"}));
    }
}
