use crate::api::jira::jira::{export_sprint_folder_to_jira, export_to_jira};
use crate::app_state::AppState;
use crate::health;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Jira export endpoints
        .route(
            "/api/workspace/{workspace_id}/jira/export",
            post(export_to_jira),
        )
        .route(
            "/api/workspace/{workspace_id}/jira/export-sprint-folder",
            post(export_sprint_folder_to_jira),
        )
        // Add shared state
        .with_state(state)
        // CORS middleware (the dashboard runs on a different origin)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
