//! HTTP router for the service.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{download_ddl, generate_mapping, health_check};
use crate::state::AppState;

/// Build the axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/ddl/download", post(download_ddl))
        .route("/mappings/generate/", post(generate_mapping))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
