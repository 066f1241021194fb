//! HTTP API Layer
//!
//! This crate exposes the claim declaration wizard over REST using Axum.
//! Each declaration is a server-side wizard session driven step by step by
//! the customer portal.
//!
//! # Architecture
//!
//! - **Handlers**: catalog, declaration sessions, health
//! - **Store**: in-memory sessions, one `WizardController` per declaration
//! - **Middleware**: request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let gateway = Arc::new(SimulatedSubmissionGateway::default());
//! let app = create_router(config, gateway);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::gateway::SubmissionGateway;
use domain_claims::validation::WizardRules;

use crate::config::ApiConfig;
use crate::handlers::{catalog, declarations, health};
use crate::middleware::audit_middleware;
use crate::store::DeclarationStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: DeclarationStore,
    pub gateway: Arc<dyn SubmissionGateway>,
    pub rules: WizardRules,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `config` - API configuration
/// * `gateway` - Backend that files submitted claims
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(config: ApiConfig, gateway: Arc<dyn SubmissionGateway>) -> Router {
    let upload_limit = config.wizard.max_upload_bytes();
    let state = AppState {
        store: DeclarationStore::with_idle_ttl(config.wizard.session_idle_ttl()),
        gateway,
        rules: config.wizard.rules(),
    };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Declaration wizard routes
    let declaration_routes = Router::new()
        .route("/", post(declarations::open_declaration))
        .route(
            "/:id",
            get(declarations::get_declaration).delete(declarations::close_declaration),
        )
        .route("/:id/claim-type", put(declarations::select_claim_type))
        .route("/:id/draft", patch(declarations::update_draft))
        .route("/:id/next", post(declarations::next_step))
        .route("/:id/previous", post(declarations::previous_step))
        .route(
            "/:id/photos",
            post(declarations::add_photos).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/:id/photos/:index", delete(declarations::remove_photo))
        .route("/:id/submit", post(declarations::submit_declaration))
        .route("/:id/notifications", get(declarations::take_notifications));

    let api_routes = Router::new()
        .route("/claim-types", get(catalog::list_claim_types))
        .nest("/declarations", declaration_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Last layer added runs first: CORS, then request ids, then tracing
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
