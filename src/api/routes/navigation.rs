//! Navigation Route
//!
//! - GET /api/v1/navigate?path=/participant/dashboard - What opening a page does

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{NavigateParams, NavigateResponse};
use crate::api::state::AppState;
use crate::navigation;

/// GET /api/v1/navigate
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NavigateParams>,
) -> Json<NavigateResponse> {
    let session = state.session.read().await;
    let navigation = navigation::navigate(&params.path, &session);

    Json(NavigateResponse {
        path: params.path,
        navigation,
    })
}
