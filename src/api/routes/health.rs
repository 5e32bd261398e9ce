//! Health Routes
//!
//! Root greeting and health check endpoints for monitoring and
//! Kubernetes probes.
//!
//! - GET / - Hello World
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{HealthResponse, MessageResponse};
use crate::api::state::AppState;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    tracing::debug!("Root endpoint was called");
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe. The store lives in memory, so the
/// service is ready as soon as it can take the store's read lock.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let tickets = state.store.len().await;
    tracing::debug!(tickets, "Readiness check passed");
    StatusCode::OK
}

/// GET /health
///
/// Full health status.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        tickets: state.store.len().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
