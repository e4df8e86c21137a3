//! Session Routes
//!
//! - GET /api/v1/session - Current user and loading status
//! - POST /api/v1/session/login - Log in (mock, any credentials)
//! - POST /api/v1/session/logout - Log out
//! - POST /api/v1/session/register - Mock registration

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{LoginRequest, RegisterResponse, SessionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session;
use crate::store::User;

/// GET /api/v1/session
pub async fn current_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.read().await;

    Json(SessionResponse {
        status: session.status(),
        user: session.current_user().cloned(),
    })
}

/// POST /api/v1/session/login
///
/// Fabricates a demo user of the requested type and stores it.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    if req.email.trim().is_empty() {
        return Err(ApiError::Validation("email is required".to_string()));
    }

    let mut session = state.session.write().await;
    let user = session.login(req.email.trim(), &req.password, req.user_type)?;

    Ok(Json(user.clone()))
}

/// POST /api/v1/session/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.session.write().await.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/session/register
///
/// Accepts any JSON body, waits the configured delay and creates nothing.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(data): Json<serde_json::Value>,
) -> (StatusCode, Json<RegisterResponse>) {
    let delay = state.session.read().await.register_delay();

    session::register(&data, delay).await;

    (
        StatusCode::ACCEPTED,
        Json(RegisterResponse {
            status: "accepted".to_string(),
        }),
    )
}
