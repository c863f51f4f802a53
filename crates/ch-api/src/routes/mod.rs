pub mod ai;
pub mod dashboard;
pub mod deploy;
pub mod relay;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Relay contract (credentials from process env)
        .route("/api/deploy/azure", post(relay::deploy_azure))
        // Full dispatcher (credentials in the request body)
        .route("/api/deploy", post(deploy::deploy))
        // AI assistance
        .route("/api/generate", post(ai::generate))
        .route("/api/chat", post(ai::chat))
        // Dashboard fixtures
        .route("/api/dashboard/deployments", get(dashboard::deployments))
        .route("/api/dashboard/health", get(dashboard::health))
        .route("/api/dashboard/domains", get(dashboard::domains))
        .with_state(state)
}
