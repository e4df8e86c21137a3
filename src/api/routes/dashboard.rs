//! Dashboard Routes
//!
//! Aggregates shown on the two dashboards, computed for the logged-in user.
//!
//! - GET /api/v1/dashboard/researcher
//! - GET /api/v1/dashboard/participant

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{ParticipantOverview, ResearcherOverview, UserType};

/// GET /api/v1/dashboard/researcher
pub async fn researcher_dashboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ResearcherOverview>> {
    let user = state.require_role(UserType::Researcher).await?;
    let store = state.studies.read().await;

    ResearcherOverview::build(&store, &user)
        .map(Json)
        .ok_or_else(|| ApiError::Internal(format!("user {} has no researcher profile", user.id)))
}

/// GET /api/v1/dashboard/participant
pub async fn participant_dashboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ParticipantOverview>> {
    let user = state.require_role(UserType::Participant).await?;
    let store = state.studies.read().await;

    ParticipantOverview::build(&store, &user)
        .map(Json)
        .ok_or_else(|| ApiError::Internal(format!("user {} has no participant profile", user.id)))
}
