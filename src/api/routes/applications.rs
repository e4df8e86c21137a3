//! Application Routes
//!
//! - GET /api/v1/studies/:id/applications - Applications received by a study
//! - POST /api/v1/studies/:id/applications - Apply as the logged-in participant
//! - GET /api/v1/applications/:id - Get a specific application
//! - PUT /api/v1/applications/:id/status - Review an application
//! - GET /api/v1/participants/:id/applications - Applications of a participant

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ApplicationListResponse, ApplyRequest, UpdateStatusRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{StudyApplication, UserType};

/// GET /api/v1/studies/:id/applications
pub async fn list_for_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<String>,
) -> ApiResult<Json<ApplicationListResponse>> {
    let store = state.studies.read().await;

    if store.study(&study_id).is_none() {
        return Err(ApiError::NotFound(format!("Study {} not found", study_id)));
    }

    let applications = store
        .applications_for_study(&study_id)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApplicationListResponse::new(applications)))
}

/// POST /api/v1/studies/:id/applications
///
/// Repeated applications and applications past the participant limit are
/// accepted.
pub async fn apply(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<StudyApplication>)> {
    let participant = state.require_role(UserType::Participant).await?;

    let mut store = state.studies.write().await;
    if store.study(&study_id).is_none() {
        return Err(ApiError::NotFound(format!("Study {} not found", study_id)));
    }

    let application = store
        .apply_to_study(&study_id, &participant.id, req.into_responses())
        .clone();

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/:id
pub async fn get_application(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudyApplication>> {
    let store = state.studies.read().await;

    store
        .application(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Application {} not found", id)))
}

/// PUT /api/v1/applications/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<StudyApplication>> {
    let mut store = state.studies.write().await;

    store
        .update_application_status(&id, req.status)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Application {} not found", id)))
}

/// GET /api/v1/participants/:id/applications
pub async fn list_for_participant(
    State(state): State<Arc<AppState>>,
    Path(participant_id): Path<String>,
) -> Json<ApplicationListResponse> {
    let store = state.studies.read().await;
    let applications = store
        .applications_by_participant(&participant_id)
        .into_iter()
        .cloned()
        .collect();

    Json(ApplicationListResponse::new(applications))
}
