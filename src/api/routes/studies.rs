//! Study Routes
//!
//! - GET /api/v1/studies - Browse active studies (search, category, methodology,
//!   location, minCompensation)
//! - POST /api/v1/studies - Post a study as the logged-in researcher
//! - GET /api/v1/studies/:id - Get a specific study
//! - GET /api/v1/researchers/:id/studies - Studies posted by a researcher

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::api::dto::{
    BrowseParams, CreateStudyRequest, RequirementInput, StudyDetailResponse, StudyListResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{NewStudy, Study, StudyRequirement, StudyStatus, UserType};

/// GET /api/v1/studies
///
/// Active studies passing the filters, highest compensation first.
pub async fn browse_studies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> ApiResult<Json<StudyListResponse>> {
    let filter = params.into_filter()?;
    let store = state.studies.read().await;

    let studies: Vec<Study> = filter.apply(store.studies()).into_iter().cloned().collect();

    tracing::debug!(
        search = %filter.search_term,
        results = studies.len(),
        "Browse query"
    );

    Ok(Json(StudyListResponse::new(studies)))
}

/// GET /api/v1/studies/:id
pub async fn get_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudyDetailResponse>> {
    let participant_id = state
        .current_user()
        .await
        .filter(|u| u.is_participant())
        .map(|u| u.id);

    let store = state.studies.read().await;
    let study = store
        .study(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Study {} not found", id)))?;

    let has_applied = participant_id
        .as_deref()
        .is_some_and(|pid| store.has_applied(pid, &id));

    Ok(Json(StudyDetailResponse {
        spots_remaining: study.spots_remaining(),
        has_applied,
        study: study.clone(),
    }))
}

/// POST /api/v1/studies
///
/// Create a study owned by the logged-in researcher. New studies are always
/// active.
pub async fn create_study(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStudyRequest>,
) -> ApiResult<(StatusCode, Json<Study>)> {
    let researcher = state.require_role(UserType::Researcher).await?;

    let new_study = validate_create_request(req, researcher.id)?;

    let mut store = state.studies.write().await;
    let study = store.create_study(new_study).clone();

    Ok((StatusCode::CREATED, Json(study)))
}

/// GET /api/v1/researchers/:id/studies
pub async fn studies_by_researcher(
    State(state): State<Arc<AppState>>,
    Path(researcher_id): Path<String>,
) -> Json<StudyListResponse> {
    let store = state.studies.read().await;
    let studies = store
        .studies_by_researcher(&researcher_id)
        .into_iter()
        .cloned()
        .collect();

    Json(StudyListResponse::new(studies))
}

/// Turn the creation form into a study draft
fn validate_create_request(req: CreateStudyRequest, researcher_id: String) -> ApiResult<NewStudy> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    if req.description.trim().is_empty() {
        return Err(ApiError::Validation("description is required".to_string()));
    }
    if !req.compensation.is_finite() || req.compensation < 0.0 {
        return Err(ApiError::Validation(
            "compensation must be a non-negative amount".to_string(),
        ));
    }

    Ok(NewStudy {
        title: req.title,
        description: req.description,
        category: req.category,
        methodology: req.methodology,
        compensation: req.compensation,
        duration: req.duration,
        participant_limit: req.participant_limit,
        requirements: number_requirements(req.requirements),
        location: req.location,
        status: StudyStatus::Active,
        researcher_id,
        deadline: req.deadline,
        tags: clean_tags(req.tags),
    })
}

/// Trimmed tags without blanks or repeats, in input order
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// Drop blank requirements and number the rest from "1"
fn number_requirements(inputs: Vec<RequirementInput>) -> Vec<StudyRequirement> {
    inputs
        .into_iter()
        .filter(|r| !r.description.trim().is_empty())
        .enumerate()
        .map(|(i, r)| {
            StudyRequirement::new((i + 1).to_string(), r.kind, r.description.trim(), r.required)
        })
        .collect()
}
