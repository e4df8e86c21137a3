//! Preference Routes
//!
//! - GET /api/v1/preferences/dark-mode
//! - PUT /api/v1/preferences/dark-mode
//! - POST /api/v1/preferences/dark-mode/toggle

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DarkModeDto;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/preferences/dark-mode
pub async fn get_dark_mode(State(state): State<Arc<AppState>>) -> ApiResult<Json<DarkModeDto>> {
    Ok(Json(DarkModeDto {
        dark_mode: state.preferences.dark_mode()?,
    }))
}

/// PUT /api/v1/preferences/dark-mode
pub async fn set_dark_mode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DarkModeDto>,
) -> ApiResult<Json<DarkModeDto>> {
    state.preferences.set_dark_mode(req.dark_mode)?;
    Ok(Json(req))
}

/// POST /api/v1/preferences/dark-mode/toggle
pub async fn toggle_dark_mode(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DarkModeDto>> {
    Ok(Json(DarkModeDto {
        dark_mode: state.preferences.toggle_dark_mode()?,
    }))
}
