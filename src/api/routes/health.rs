//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes health checks.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (session restored)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::session::SessionStatus;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once the stored session has been looked at.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.session.read().await.status() {
        SessionStatus::Ready => StatusCode::OK,
        SessionStatus::Loading => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let session_status = state.session.read().await.status();
    let (studies, applications) = {
        let store = state.studies.read().await;
        (store.studies().len(), store.applications().len())
    };

    let status = match session_status {
        SessionStatus::Ready => "healthy",
        SessionStatus::Loading => "unhealthy",
    };
    let session = match session_status {
        SessionStatus::Ready => "ready",
        SessionStatus::Loading => "loading",
    };

    Json(HealthResponse {
        status: status.to_string(),
        store: "ok".to_string(),
        session: session.to_string(),
        studies,
        applications,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
