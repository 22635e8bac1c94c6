//! Session lifecycle
//!
//! Validity of the remote session is an explicit state machine:
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated(token)
//! Authenticated --invalid-session fault--> Unauthenticated (re-login on next call)
//! ```
//!
//! A failed login leaves the state `Unauthenticated`; a transport failure
//! never changes it. The store's mutex doubles as the single-flight guard:
//! `ensure_session` holds it across the login call, so N concurrent callers
//! trigger at most one login.

use tokio::sync::{Mutex, MutexGuard};

use crm_core::SessionToken;

/// Validity state of the adapter's one session slot
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(SessionToken),
}

impl SessionState {
    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            SessionState::Authenticated(token) => Some(token),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Holder of the single session per adapter instance
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, without triggering a login
    pub async fn current(&self) -> Option<SessionToken> {
        self.state.lock().await.token().cloned()
    }

    /// Locks the state; callers hold the guard across a login to serialize it
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Drops the stored token so the next call re-authenticates
    pub async fn invalidate(&self) {
        *self.state.lock().await = SessionState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_unauthenticated() {
        let store = SessionStore::new();
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_then_invalidate() {
        let store = SessionStore::new();
        *store.lock().await = SessionState::Authenticated(SessionToken::new("abc123"));
        assert_eq!(store.current().await.unwrap().as_str(), "abc123");

        store.invalidate().await;
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_lock_serializes_writers() {
        let store = SessionStore::new();
        let guard = store.lock().await;
        // A second locker must wait until the guard drops
        assert!(store.state.try_lock().is_err());
        drop(guard);
        assert!(store.state.try_lock().is_ok());
    }
}
