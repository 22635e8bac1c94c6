//! HTTP API Layer
//!
//! This crate provides the REST surface of the CRM bridge using Axum. It is
//! a thin shell: handlers extract and presence-check parameters, invoke the
//! [`crm_core::CrmPort`] adapter, and return the raw remote response.
//!
//! # Architecture
//!
//! - **Handlers**: one module per entity type plus health checks
//! - **DTOs**: request shapes matching the original route contracts
//! - **Middleware**: request audit logging
//! - **Error Handling**: adapter errors mapped onto HTTP statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(client));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crm_core::CrmPort;

use crate::handlers::{accounts, contacts, health, leads, opportunities};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<dyn CrmPort>,
}

/// Creates the main API router
///
/// Route paths match the original bridge contract: every operation is a
/// POST under its entity prefix.
pub fn create_router(crm: Arc<dyn CrmPort>) -> Router {
    let state = AppState { crm };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let contact_routes = Router::new()
        .route("/search", post(contacts::search_contacts))
        .route("/create", post(contacts::create_contact))
        .route("/update", post(contacts::update_contact));

    let lead_routes = Router::new()
        .route("/search", post(leads::search_leads))
        .route("/create", post(leads::create_lead))
        .route("/update", post(leads::update_lead))
        .route("/convert", post(leads::convert_lead));

    let account_routes = Router::new()
        .route("/search", post(accounts::search_accounts))
        .route("/create", post(accounts::create_account))
        .route("/update", post(accounts::update_account));

    let opportunity_routes = Router::new()
        .route("/search", post(opportunities::search_opportunities))
        .route("/create", post(opportunities::create_opportunity))
        .route("/update", post(opportunities::update_opportunity));

    Router::new()
        .merge(public_routes)
        .nest("/contacts", contact_routes)
        .nest("/leads", lead_routes)
        .nest("/accounts", account_routes)
        .nest("/opportunities", opportunity_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
