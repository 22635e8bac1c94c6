//! Per-entity operations
//!
//! Every operation composes `ensure_session` with one `call`: a list
//! operation for search, a create-or-update operation for create/update, and
//! the lead conversion call. The shapes here mirror `protocol` exactly; the
//! raw response bodies are returned uninterpreted.

use async_trait::async_trait;
use serde_json::Value;

use crm_core::{CrmError, CrmModule, CrmPort, FieldValues, RecordId, SearchFilter};

use crate::client::{encode, SuiteCrmClient};
use crate::protocol::{methods, ConvertArgs, ListArgs, SetArgs};

#[async_trait]
impl CrmPort for SuiteCrmClient {
    async fn search(&self, filter: SearchFilter) -> Result<Value, CrmError> {
        let module = filter.module();
        let query = filter.query();

        self.with_session(|token| {
            encode(
                methods::GET_ENTRY_LIST,
                &ListArgs {
                    session: token.as_str(),
                    module_name: module.name(),
                    query: query.clone(),
                    select_fields: module.select_fields(),
                    max_results: self.config().max_results,
                },
            )
        })
        .await
    }

    async fn create(&self, module: CrmModule, fields: FieldValues) -> Result<Value, CrmError> {
        if fields.is_empty() {
            return Err(CrmError::invalid_input("create payload is empty"));
        }
        let list = fields.into_name_value_list();

        self.with_session(|token| {
            encode(
                methods::SET_ENTRY,
                &SetArgs {
                    session: token.as_str(),
                    module_name: module.name(),
                    name_value_list: &list,
                },
            )
        })
        .await
    }

    async fn update(
        &self,
        module: CrmModule,
        id: RecordId,
        fields: FieldValues,
    ) -> Result<Value, CrmError> {
        if id.is_empty() {
            return Err(CrmError::invalid_input("record id is empty"));
        }
        if fields.is_empty() {
            return Err(CrmError::invalid_input("update payload is empty"));
        }
        // The id pair comes first; that is what marks this as a mutation
        let list = fields.into_update_list(&id);

        self.with_session(|token| {
            encode(
                methods::SET_ENTRY,
                &SetArgs {
                    session: token.as_str(),
                    module_name: module.name(),
                    name_value_list: &list,
                },
            )
        })
        .await
    }

    async fn convert_lead(&self, id: RecordId) -> Result<Value, CrmError> {
        if id.is_empty() {
            return Err(CrmError::invalid_input("lead id is empty"));
        }

        self.with_session(|token| {
            encode(
                methods::CONVERT_LEAD,
                &ConvertArgs {
                    session: token.as_str(),
                    id: id.as_str(),
                },
            )
        })
        .await
    }

    async fn ready(&self) -> Result<(), CrmError> {
        self.ensure_session().await.map(|_| ())
    }
}
