//! The reqwest-based session adapter
//!
//! `SuiteCrmClient` guarantees that any remote operation is attempted only
//! after a session exists, and provides the single choke point (`call`) for
//! constructing and sending the request envelope. There is no retry and no
//! backoff; the only automatic recovery is a single re-login + replay when
//! the remote rejects the session token.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crm_core::{CrmError, RemoteFault, SessionToken};

use crate::config::CrmConfig;
use crate::protocol::{methods, LoginArgs, RestEnvelope, UserAuth, USER_AUTH_VERSION};
use crate::session::{SessionState, SessionStore};

/// Adapter for the legacy CRM REST endpoint
///
/// One instance owns one session token. Instances are cheap to share behind
/// an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct SuiteCrmClient {
    http: reqwest::Client,
    config: CrmConfig,
    session: SessionStore,
}

impl SuiteCrmClient {
    /// Builds a client with the configured request timeout
    pub fn new(config: CrmConfig) -> Result<Self, CrmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CrmError::transport_from("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            config,
            session: SessionStore::new(),
        })
    }

    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    /// The stored session token, if any, without triggering a login
    pub async fn current_session(&self) -> Option<SessionToken> {
        self.session.current().await
    }

    /// Issues a named operation with the given `rest_data` parameters
    ///
    /// Serializes `rest_data`, wraps it in the form envelope, and POSTs it.
    /// The decoded response body is returned as an opaque JSON value; fault
    /// bodies surface as `CrmError::Remote`.
    pub async fn call(
        &self,
        method: &str,
        rest_data: &(impl Serialize + ?Sized),
    ) -> Result<Value, CrmError> {
        let envelope = encode(method, rest_data)?;
        self.send(&envelope).await
    }

    /// Returns the current session token, logging in first when absent
    ///
    /// The session lock is held across the login, so concurrent callers
    /// racing on a cold client issue exactly one login between them.
    pub async fn ensure_session(&self) -> Result<SessionToken, CrmError> {
        let mut state = self.session.lock().await;
        if let Some(token) = state.token() {
            return Ok(token.clone());
        }

        let token = self.login().await?;
        *state = SessionState::Authenticated(token.clone());
        Ok(token)
    }

    /// Performs the login operation and returns the granted token
    ///
    /// Does not store the token; `ensure_session` owns the state. Success is
    /// signaled by an `id` field in the response; anything else is an
    /// authentication failure.
    pub async fn login(&self) -> Result<SessionToken, CrmError> {
        let args = LoginArgs {
            user_auth: UserAuth {
                user_name: &self.config.username,
                password: self.config.password_hash.digest(&self.config.password),
                version: USER_AUTH_VERSION,
            },
            application_name: &self.config.application_name,
            name_value_list: Vec::new(),
        };

        let result = match self.call(methods::LOGIN, &args).await {
            Ok(body) => body,
            // The server reports bad credentials as a fault body
            Err(CrmError::Remote(fault)) => {
                return Err(CrmError::authentication(fault.to_string()));
            }
            Err(other) => return Err(other),
        };

        match result.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                info!(user = %self.config.username, "authenticated against remote CRM");
                Ok(SessionToken::new(id))
            }
            _ => Err(CrmError::authentication(
                "login response carried no session id",
            )),
        }
    }

    /// Runs an operation that needs a session, re-authenticating once if the
    /// remote rejects the stored token
    pub(crate) async fn with_session<F>(&self, build: F) -> Result<Value, CrmError>
    where
        F: Fn(&SessionToken) -> Result<RestEnvelope, CrmError>,
    {
        let token = self.ensure_session().await?;
        let envelope = build(&token)?;

        match self.send(&envelope).await {
            Err(CrmError::Remote(fault)) if fault.is_invalid_session() => {
                warn!(method = %envelope.method, "session rejected by remote, re-authenticating");
                self.session.invalidate().await;

                let token = self.ensure_session().await?;
                let envelope = build(&token)?;
                self.send(&envelope).await
            }
            other => other,
        }
    }

    async fn send(&self, envelope: &RestEnvelope) -> Result<Value, CrmError> {
        let started = Instant::now();

        let response = self
            .http
            .post(&self.config.url)
            .form(envelope)
            .send()
            .await
            .map_err(|e| {
                CrmError::transport_from(format!("POST {} failed", self.config.url), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrmError::transport(format!("API call failed: {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CrmError::transport_from("response body was not valid JSON", e))?;

        if let Some(fault) = RemoteFault::from_response(&body) {
            warn!(method = %envelope.method, fault = %fault, "remote operation failed");
            return Err(CrmError::Remote(fault));
        }

        debug!(
            method = %envelope.method,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "remote call completed"
        );
        Ok(body)
    }
}

pub(crate) fn encode(
    method: &str,
    rest_data: &(impl Serialize + ?Sized),
) -> Result<RestEnvelope, CrmError> {
    RestEnvelope::new(method, rest_data)
        .map_err(|e| CrmError::invalid_input(format!("unencodable parameters: {e}")))
}
