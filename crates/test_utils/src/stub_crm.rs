//! In-process stub of the legacy REST endpoint
//!
//! Serves `POST /service/v4_1/rest.php` on an ephemeral local port and
//! implements just enough of the v4.1 protocol for the test suite: login
//! with granted-token tracking, `set_entry` against an in-memory record
//! store, `get_entry_list` with substring/equality query matching, and
//! `convert_lead`. Every decoded call is recorded for assertions, and
//! failure modes (login without id, HTTP 500, revoked sessions, slow
//! responses) can be scripted per test.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// One decoded request observed by the stub
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub rest_data: Value,
    /// Names of the form fields, in arrival order
    pub form_fields: Vec<String>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    fields: Map<String, Value>,
}

#[derive(Debug, Default)]
struct StubState {
    login_count: AtomicUsize,
    session_counter: AtomicUsize,
    fail_logins: AtomicBool,
    http_error_next: AtomicBool,
    granted: Mutex<HashSet<String>>,
    calls: Mutex<Vec<RecordedCall>>,
    records: Mutex<HashMap<String, Vec<StoredRecord>>>,
    delay: Mutex<Option<Duration>>,
}

/// Stub CRM server bound to an ephemeral local port
pub struct StubCrm {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubCrm {
    /// Starts the stub and waits until it is accepting connections
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/service/v4_1/rest.php", post(rest_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        Self { addr, state, handle }
    }

    /// Full URL of the REST endpoint
    pub fn url(&self) -> String {
        format!("http://{}/service/v4_1/rest.php", self.addr)
    }

    /// Number of login operations received so far
    pub fn login_count(&self) -> usize {
        self.state.login_count.load(Ordering::SeqCst)
    }

    /// All calls observed so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Decoded `rest_data` of every call with the given method name
    pub fn rest_data_for(&self, method: &str) -> Vec<Value> {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.rest_data.clone())
            .collect()
    }

    /// Makes login responses omit the session id until re-enabled
    pub fn fail_logins(&self, fail: bool) {
        self.state.fail_logins.store(fail, Ordering::SeqCst);
    }

    /// Makes the next request fail with HTTP 500
    pub fn fail_next_request(&self) {
        self.state.http_error_next.store(true, Ordering::SeqCst);
    }

    /// Revokes every granted session; the next operation faults with
    /// an invalid-session fault until a fresh login is performed
    pub fn revoke_sessions(&self) {
        self.state.granted.lock().unwrap().clear();
    }

    /// Delays every response by the given duration
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = Some(delay);
    }

    /// Seeds a record directly into the store, returning its id
    pub fn seed_record(&self, module: &str, fields: Map<String, Value>) -> String {
        let id = Uuid::new_v4().to_string();
        self.state
            .records
            .lock()
            .unwrap()
            .entry(module.to_string())
            .or_default()
            .push(StoredRecord { id: id.clone(), fields });
        id
    }

    /// Number of records stored for a module
    pub fn record_count(&self, module: &str) -> usize {
        self.state
            .records
            .lock()
            .unwrap()
            .get(module)
            .map_or(0, Vec::len)
    }
}

impl Drop for StubCrm {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn rest_handler(
    State(state): State<Arc<StubState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let form_fields: Vec<String> = pairs.iter().map(|(name, _)| name.clone()).collect();
    let form: HashMap<String, String> = pairs.into_iter().collect();
    let method = form.get("method").cloned().unwrap_or_default();
    let rest_data: Value = form
        .get("rest_data")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(Value::Null);

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        rest_data: rest_data.clone(),
        form_fields,
    });

    if state.http_error_next.swap(false, Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response();
    }

    match method.as_str() {
        "login" => handle_login(&state),
        "get_entry_list" => with_session(&state, &rest_data, handle_list),
        "set_entry" => with_session(&state, &rest_data, handle_set),
        "convert_lead" => with_session(&state, &rest_data, handle_convert),
        other => fault(20, "Method Not Found", &format!("unknown method {other:?}")),
    }
}

fn handle_login(state: &StubState) -> Response {
    if state.fail_logins.load(Ordering::SeqCst) {
        return Json(json!({"result": "failure"})).into_response();
    }

    state.login_count.fetch_add(1, Ordering::SeqCst);
    let n = state.session_counter.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("sess-{n}");
    state.granted.lock().unwrap().insert(token.clone());
    Json(json!({"id": token, "module_name": "Users"})).into_response()
}

fn with_session(
    state: &StubState,
    rest_data: &Value,
    op: fn(&StubState, &Value) -> Response,
) -> Response {
    let session = rest_data.get("session").and_then(Value::as_str);
    let valid = session
        .map(|token| state.granted.lock().unwrap().contains(token))
        .unwrap_or(false);
    if !valid {
        return fault(11, "Invalid Session ID", "The session ID is invalid");
    }
    op(state, rest_data)
}

fn handle_list(state: &StubState, rest_data: &Value) -> Response {
    let module = rest_data
        .get("module_name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let query = rest_data
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let max_results = rest_data
        .get("max_results")
        .and_then(Value::as_u64)
        .unwrap_or(10) as usize;

    let Some((field, substring, conditions)) = parse_query(query) else {
        return fault(40, "Invalid Query", &format!("unparseable query {query:?}"));
    };

    let records = state.records.lock().unwrap();
    let entries: Vec<Value> = records
        .get(module)
        .map(|list| {
            list.iter()
                .filter(|record| matches_query(record, &field, &substring, &conditions))
                .take(max_results)
                .map(|record| entry_json(module, record))
                .collect()
        })
        .unwrap_or_default();

    Json(json!({
        "result_count": entries.len(),
        "total_count": entries.len(),
        "entry_list": entries,
    }))
    .into_response()
}

fn handle_set(state: &StubState, rest_data: &Value) -> Response {
    let module = rest_data
        .get("module_name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let pairs = rest_data
        .get("name_value_list")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut fields = Map::new();
    for pair in pairs {
        if let (Some(name), Some(value)) = (
            pair.get("name").and_then(Value::as_str),
            pair.get("value"),
        ) {
            fields.insert(name.to_string(), value.clone());
        }
    }

    let mut records = state.records.lock().unwrap();
    let list = records.entry(module.to_string()).or_default();

    // A payload whose first pair is the id mutates an existing record
    let id = match fields.remove("id").and_then(|v| v.as_str().map(String::from)) {
        Some(id) => {
            if let Some(existing) = list.iter_mut().find(|record| record.id == id) {
                existing.fields.extend(fields);
            } else {
                list.push(StoredRecord { id: id.clone(), fields });
            }
            id
        }
        None => {
            let id = Uuid::new_v4().to_string();
            list.push(StoredRecord { id: id.clone(), fields });
            id
        }
    };

    Json(json!({"id": id})).into_response()
}

fn handle_convert(_state: &StubState, rest_data: &Value) -> Response {
    let id = rest_data.get("id").and_then(Value::as_str).unwrap_or_default();
    Json(json!({"id": id, "converted": true})).into_response()
}

fn fault(number: i64, name: &str, description: &str) -> Response {
    Json(json!({
        "name": name,
        "number": number,
        "description": description,
    }))
    .into_response()
}

/// Splits `<table>.<field> LIKE '%<sub>%' [AND <table>.<attr> = '<value>']*`
fn parse_query(query: &str) -> Option<(String, String, Vec<(String, String)>)> {
    let mut clauses = query.split(" AND ");

    let like = clauses.next()?;
    let (lhs, rhs) = like.split_once(" LIKE ")?;
    let field = lhs.split_once('.')?.1.to_string();
    let substring = rhs.strip_prefix("'%")?.strip_suffix("%'")?.to_string();

    let mut conditions = Vec::new();
    for clause in clauses {
        let (lhs, rhs) = clause.split_once(" = ")?;
        let attribute = lhs.split_once('.')?.1.to_string();
        let value = rhs.strip_prefix('\'')?.strip_suffix('\'')?.to_string();
        conditions.push((attribute, value));
    }

    Some((field, substring, conditions))
}

fn matches_query(
    record: &StoredRecord,
    field: &str,
    substring: &str,
    conditions: &[(String, String)],
) -> bool {
    let field_matches = record
        .fields
        .get(field)
        .map(text_of)
        .is_some_and(|text| text.contains(substring));

    field_matches
        && conditions.iter().all(|(attribute, value)| {
            record
                .fields
                .get(attribute)
                .map(text_of)
                .is_some_and(|text| text == *value)
        })
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn entry_json(module: &str, record: &StoredRecord) -> Value {
    let mut name_values = Map::new();
    name_values.insert(
        "id".to_string(),
        json!({"name": "id", "value": record.id}),
    );
    for (name, value) in &record.fields {
        name_values.insert(
            name.clone(),
            json!({"name": name, "value": value}),
        );
    }

    json!({
        "id": record.id,
        "module_name": module,
        "name_value_list": name_values,
    })
}
