//! HTTP router assembly

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{health, v1};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/runs/lead", post(v1::run_lead))
        .route("/v1/runs/ticket", post(v1::run_ticket))
        .route("/v1/runs/complaint", post(v1::run_complaint))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
