//! Port trait for CRM operations
//!
//! The `CrmPort` trait is the seam between the HTTP shell and the session
//! adapter. The shell depends only on this trait; the concrete reqwest-based
//! adapter lives in `infra_crm`, and a mock implementation is available for
//! testing the shell without a remote.
//!
//! Results are raw `serde_json::Value` bodies: the remote's responses are
//! not schema-validated, and callers are responsible for interpreting
//! fields.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CrmError;
use crate::module::CrmModule;
use crate::query::SearchFilter;
use crate::record::{FieldValues, RecordId};

/// Remote CRM operations exposed to the transport shell
#[async_trait]
pub trait CrmPort: Send + Sync {
    /// Lists records matching the filter, capped at the adapter's result limit
    async fn search(&self, filter: SearchFilter) -> Result<Value, CrmError>;

    /// Creates a record from the given fields
    async fn create(&self, module: CrmModule, fields: FieldValues) -> Result<Value, CrmError>;

    /// Mutates an existing record identified by `id`
    async fn update(
        &self,
        module: CrmModule,
        id: RecordId,
        fields: FieldValues,
    ) -> Result<Value, CrmError>;

    /// Converts a lead; carries nothing beyond the lead identifier
    async fn convert_lead(&self, id: RecordId) -> Result<Value, CrmError>;

    /// Verifies the remote is reachable and a session can be established
    async fn ready(&self) -> Result<(), CrmError>;
}

/// Mock implementation of CrmPort for testing the shell
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// A call observed by the mock, for assertions
    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedCall {
        Search { module: CrmModule, query: String },
        Create { module: CrmModule, fields: Vec<crate::record::NameValue> },
        Update {
            module: CrmModule,
            id: RecordId,
            fields: Vec<crate::record::NameValue>,
        },
        ConvertLead { id: RecordId },
        Ready,
    }

    /// In-memory mock returning a canned response
    pub struct MockCrmPort {
        response: Value,
        failure: Mutex<Option<CrmError>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockCrmPort {
        pub fn new() -> Self {
            Self::with_response(serde_json::json!({"result_count": 0, "entry_list": []}))
        }

        pub fn with_response(response: Value) -> Self {
            Self {
                response,
                failure: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Makes the next call fail with the given error
        pub fn fail_next(&self, error: CrmError) {
            *self.failure.lock().unwrap() = Some(error);
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: RecordedCall) -> Result<Value, CrmError> {
            if let Some(error) = self.failure.lock().unwrap().take() {
                return Err(error);
            }
            self.calls.lock().unwrap().push(call);
            Ok(self.response.clone())
        }
    }

    impl Default for MockCrmPort {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CrmPort for MockCrmPort {
        async fn search(&self, filter: SearchFilter) -> Result<Value, CrmError> {
            self.record(RecordedCall::Search {
                module: filter.module(),
                query: filter.query(),
            })
        }

        async fn create(
            &self,
            module: CrmModule,
            fields: FieldValues,
        ) -> Result<Value, CrmError> {
            self.record(RecordedCall::Create {
                module,
                fields: fields.into_name_value_list(),
            })
        }

        async fn update(
            &self,
            module: CrmModule,
            id: RecordId,
            fields: FieldValues,
        ) -> Result<Value, CrmError> {
            self.record(RecordedCall::Update {
                module,
                fields: fields.into_name_value_list(),
                id,
            })
        }

        async fn convert_lead(&self, id: RecordId) -> Result<Value, CrmError> {
            self.record(RecordedCall::ConvertLead { id })
        }

        async fn ready(&self) -> Result<(), CrmError> {
            self.record(RecordedCall::Ready).map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockCrmPort, RecordedCall};
    use super::*;

    #[tokio::test]
    async fn test_mock_records_search() {
        let port = MockCrmPort::new();
        let filter = SearchFilter::new(CrmModule::Leads, "555");
        port.search(filter).await.unwrap();

        assert_eq!(
            port.calls(),
            vec![RecordedCall::Search {
                module: CrmModule::Leads,
                query: "leads.phone_mobile LIKE '%555%'".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_mock_failure_is_one_shot() {
        let port = MockCrmPort::new();
        port.fail_next(CrmError::transport("boom"));

        let err = port
            .convert_lead(RecordId::from("1"))
            .await
            .unwrap_err();
        assert!(err.is_transport());

        port.convert_lead(RecordId::from("1")).await.unwrap();
        assert_eq!(port.calls().len(), 1);
    }
}
