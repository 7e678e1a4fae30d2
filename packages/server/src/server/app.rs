//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    clear_error_handler, create_lead_handler, delete_lead_handler, health_handler,
    lead_details_handler, lead_status_handler, list_leads_handler, retry_lead_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AppState { deps };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/leads", post(create_lead_handler).get(list_leads_handler))
        .route("/api/leads/details", get(lead_details_handler))
        .route("/api/leads/clear-error", post(clear_error_handler))
        .route("/api/leads/delete", delete(delete_lead_handler))
        .route("/api/leads/:id/status", get(lead_status_handler))
        .route("/api/leads/:id/retry", post(retry_lead_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
