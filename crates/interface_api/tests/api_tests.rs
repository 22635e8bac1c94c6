//! Route tests for the HTTP shell
//!
//! Most tests drive the router against the mock port; the end-to-end module
//! at the bottom wires the real adapter to the stub CRM server.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use crm_core::ports::mock::{MockCrmPort, RecordedCall};
use crm_core::{CrmError, CrmModule, RemoteFault};
use interface_api::create_router;

fn server_with(mock: Arc<MockCrmPort>) -> TestServer {
    TestServer::new(create_router(mock)).unwrap()
}

#[tokio::test]
async fn search_route_builds_the_documented_filter() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/leads/search")
        .json(&json!({"query": "a@b.com", "field": "email1", "status": "New"}))
        .await;
    response.assert_status_ok();

    assert_eq!(
        mock.calls(),
        vec![RecordedCall::Search {
            module: CrmModule::Leads,
            query: "leads.email1 LIKE '%a@b.com%' AND leads.status = 'New'".to_string(),
        }]
    );
}

#[tokio::test]
async fn search_defaults_to_the_entity_search_field() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    server
        .post("/opportunities/search")
        .json(&json!({"query": "renewal"}))
        .await
        .assert_status_ok();

    assert_eq!(
        mock.calls(),
        vec![RecordedCall::Search {
            module: CrmModule::Opportunities,
            query: "opportunities.name LIKE '%renewal%'".to_string(),
        }]
    );
}

#[tokio::test]
async fn create_route_passes_fields_through_untouched() {
    let mock = Arc::new(MockCrmPort::with_response(json!({"id": "new-1"})));
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/contacts/create")
        .json(&json!({"first_name": "Dana", "phone_mobile": "555-0142"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], "new-1");

    match &mock.calls()[0] {
        RecordedCall::Create { module, fields } => {
            assert_eq!(*module, CrmModule::Contacts);
            assert!(fields
                .iter()
                .any(|nv| nv.name == "phone_mobile" && nv.value == json!("555-0142")));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn update_route_separates_id_from_fields() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    server
        .post("/accounts/update")
        .json(&json!({"account_id": "42", "account_data": {"name": "X"}}))
        .await
        .assert_status_ok();

    match &mock.calls()[0] {
        RecordedCall::Update { module, id, fields } => {
            assert_eq!(*module, CrmModule::Accounts);
            assert_eq!(id.as_str(), "42");
            assert!(fields.iter().all(|nv| nv.name != "id"));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn convert_route_carries_the_lead_id() {
    let mock = Arc::new(MockCrmPort::with_response(json!({"converted": true})));
    let server = server_with(Arc::clone(&mock));

    server
        .post("/leads/convert")
        .json(&json!({"lead_id": "lead-7"}))
        .await
        .assert_status_ok();

    match &mock.calls()[0] {
        RecordedCall::ConvertLead { id } => assert_eq!(id.as_str(), "lead-7"),
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn empty_query_is_rejected_without_a_remote_call() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/contacts/search")
        .json(&json!({"query": ""}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn empty_update_payload_is_rejected() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/leads/update")
        .json(&json!({"lead_id": "42", "lead_data": {}}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn hostile_field_names_are_rejected() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/leads/search")
        .json(&json!({"query": "x", "field": "email1' OR 1=1 --"}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn remote_faults_surface_as_bad_gateway() {
    let mock = Arc::new(MockCrmPort::new());
    mock.fail_next(CrmError::Remote(RemoteFault {
        name: "Module Does Not Exist".to_string(),
        number: 20,
        description: "The module name is invalid".to_string(),
    }));
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/accounts/search")
        .json(&json!({"query": "Helios"}))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"], "upstream_fault");
}

#[tokio::test]
async fn transport_failures_surface_as_bad_gateway() {
    let mock = Arc::new(MockCrmPort::new());
    mock.fail_next(CrmError::transport("connection refused"));
    let server = server_with(Arc::clone(&mock));

    let response = server
        .post("/opportunities/search")
        .json(&json!({"query": "renewal"}))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"], "upstream_unreachable");
}

#[tokio::test]
async fn health_and_readiness_respond() {
    let mock = Arc::new(MockCrmPort::new());
    let server = server_with(Arc::clone(&mock));

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "healthy");

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], "ready");
}

mod end_to_end {
    use super::*;
    use infra_crm::{CrmConfig, SuiteCrmClient};
    use test_utils::{PayloadFixtures, StubCrm};

    fn bridge_for(stub: &StubCrm) -> TestServer {
        let client =
            SuiteCrmClient::new(CrmConfig::new(stub.url(), "admin", "secret")).unwrap();
        TestServer::new(create_router(Arc::new(client))).unwrap()
    }

    #[tokio::test]
    async fn created_leads_are_found_by_search() {
        let stub = StubCrm::start().await;
        let server = bridge_for(&stub);

        let created = server.post("/leads/create").json(&PayloadFixtures::lead()).await;
        created.assert_status_ok();
        let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

        let found = server
            .post("/leads/search")
            .json(&json!({"query": "555-0187", "status": "New"}))
            .await;
        found.assert_status_ok();

        let body = found.json::<Value>();
        assert_eq!(body["entry_list"][0]["id"], json!(id));
        // One session served both operations
        assert_eq!(stub.login_count(), 1);
    }

    #[tokio::test]
    async fn readiness_fails_when_login_is_rejected() {
        let stub = StubCrm::start().await;
        let server = bridge_for(&stub);

        stub.fail_logins(true);
        let ready = server.get("/health/ready").await;
        ready.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(ready.json::<Value>()["error"], "upstream_auth_failed");
    }
}
