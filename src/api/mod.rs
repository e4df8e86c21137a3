//! Namika REST API
//!
//! HTTP API layer for Namika, built with Axum.
//!
//! # Endpoints
//!
//! ## Session
//! - `GET /api/v1/session` - Current user and loading status
//! - `POST /api/v1/session/login` - Log in as a demo researcher or participant
//! - `POST /api/v1/session/logout` - Log out
//! - `POST /api/v1/session/register` - Mock registration
//!
//! ## Studies
//! - `GET /api/v1/studies` - Browse active studies
//! - `POST /api/v1/studies` - Create a study (researcher)
//! - `GET /api/v1/studies/:id` - Get a study
//! - `GET /api/v1/researchers/:id/studies` - Studies of a researcher
//!
//! ## Applications
//! - `GET /api/v1/studies/:id/applications` - Applications for a study
//! - `POST /api/v1/studies/:id/applications` - Apply (participant)
//! - `GET /api/v1/applications/:id` - Get an application
//! - `PUT /api/v1/applications/:id/status` - Change application status
//! - `GET /api/v1/participants/:id/applications` - Applications of a participant
//!
//! ## Dashboards
//! - `GET /api/v1/dashboard/researcher`
//! - `GET /api/v1/dashboard/participant`
//!
//! ## Navigation & preferences
//! - `GET /api/v1/navigate?path=` - Render, redirect or wait for a page
//! - `GET|PUT /api/v1/preferences/dark-mode`
//! - `POST /api/v1/preferences/dark-mode/toggle`
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use namika::api::{serve, AppState};
//! use namika::config::ApiConfig;
//! use namika::session::{MemoryStore, Preferences, SessionStore};
//! use namika::store::StudyStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(MemoryStore::new());
//!     let mut session = SessionStore::new(storage.clone());
//!     session.restore()?;
//!
//!     let config = ApiConfig::default();
//!     let state = AppState::new(
//!         StudyStore::seeded(),
//!         session,
//!         Preferences::new(storage),
//!         config.clone(),
//!     );
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Session routes
        .route("/session", get(routes::session::current_session))
        .route("/session/login", post(routes::session::login))
        .route("/session/logout", post(routes::session::logout))
        .route("/session/register", post(routes::session::register))
        // Study routes
        .route(
            "/studies",
            get(routes::studies::browse_studies).post(routes::studies::create_study),
        )
        .route("/studies/:id", get(routes::studies::get_study))
        .route(
            "/researchers/:id/studies",
            get(routes::studies::studies_by_researcher),
        )
        // Application routes
        .route(
            "/studies/:id/applications",
            get(routes::applications::list_for_study).post(routes::applications::apply),
        )
        .route("/applications/:id", get(routes::applications::get_application))
        .route(
            "/applications/:id/status",
            put(routes::applications::update_status),
        )
        .route(
            "/participants/:id/applications",
            get(routes::applications::list_for_participant),
        )
        // Dashboard routes
        .route(
            "/dashboard/researcher",
            get(routes::dashboard::researcher_dashboard),
        )
        .route(
            "/dashboard/participant",
            get(routes::dashboard::participant_dashboard),
        )
        // Navigation and preferences
        .route("/navigate", get(routes::navigation::navigate))
        .route(
            "/preferences/dark-mode",
            get(routes::preferences::get_dark_mode).put(routes::preferences::set_dark_mode),
        )
        .route(
            "/preferences/dark-mode/toggle",
            post(routes::preferences::toggle_dark_mode),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let timeout = state.config.request_timeout();

    // Create shared state
    let shared_state = Arc::new(state);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let router = if !timeout.is_zero() {
        router.layer(TimeoutLayer::new(timeout))
    } else {
        router
    };

    router.with_state(shared_state)
}

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Namika API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Namika API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, Preferences, SessionStore};
    use crate::store::StudyStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_app(true)
    }

    fn create_app(restore: bool) -> Router {
        let storage = Arc::new(MemoryStore::new());
        let mut session = SessionStore::new(storage.clone()).with_register_delay(Duration::ZERO);
        if restore {
            session.restore().unwrap();
        }

        let state = AppState::new(
            StudyStore::seeded(),
            session,
            Preferences::new(storage),
            ApiConfig::default(),
        );
        build_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("Content-Type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn login(app: &Router, user_type: &str) -> Value {
        let (status, user) = send(
            app,
            "POST",
            "/api/v1/session/login",
            Some(json!({"email": "demo@namika.test", "password": "x", "type": user_type})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        user
    }

    fn ids(list: &Value) -> Vec<String> {
        list["studies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let (status, _) = send(&app, "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_waits_for_restore() {
        let (status, _) = send(&create_test_app(), "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&create_app(false), "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = send(&create_test_app(), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["studies"], 8);
        assert_eq!(body["applications"], 2);
    }

    #[tokio::test]
    async fn test_session_starts_logged_out() {
        let (status, body) = send(&create_test_app(), "GET", "/api/v1/session", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let app = create_test_app();

        let user = login(&app, "participant").await;
        assert_eq!(user["type"], "participant");
        assert_eq!(user["profile"]["firstName"], "Alex");

        let (_, body) = send(&app, "GET", "/api/v1/session", None).await;
        assert_eq!(body["user"]["id"], user["id"]);

        let (status, _) = send(&app, "POST", "/api/v1/session/logout", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", "/api/v1/session", None).await;
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_register_is_accepted() {
        let (status, body) = send(
            &create_test_app(),
            "POST",
            "/api/v1/session/register",
            Some(json!({"email": "new@namika.test", "anything": [1, 2]})),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "accepted");
    }

    #[tokio::test]
    async fn test_browse_by_category() {
        let (status, body) = send(
            &create_test_app(),
            "GET",
            "/api/v1/studies?category=UX%20Research",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["8", "3", "1"]);
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn test_browse_min_compensation() {
        let (_, body) = send(
            &create_test_app(),
            "GET",
            "/api/v1/studies?minCompensation=200&category=all",
            None,
        )
        .await;

        assert_eq!(ids(&body), vec!["5", "8", "2"]);
    }

    #[tokio::test]
    async fn test_browse_rejects_unknown_location() {
        let (status, body) = send(
            &create_test_app(),
            "GET",
            "/api/v1/studies?location=moon",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_study() {
        let app = create_test_app();

        let (status, body) = send(&app, "GET", "/api/v1/studies/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "1");
        assert_eq!(body["hasApplied"], false);

        let (status, _) = send(&app, "GET", "/api/v1/studies/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_study_requires_researcher() {
        let app = create_test_app();
        let study = json!({
            "title": "Voice assistant diary",
            "description": "Two weeks of voice assistant use",
            "category": "User Interviews",
            "methodology": "Diary Study",
            "compensation": 120,
            "duration": "2 weeks",
            "participantLimit": 12,
            "location": "remote",
            "deadline": "2024-05-01",
            "tags": ["voice", " voice ", ""],
            "requirements": [
                {"type": "custom", "description": "Owns a smart speaker"},
                {"type": "age", "description": ""}
            ]
        });

        let (status, _) = send(&app, "POST", "/api/v1/studies", Some(study.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        login(&app, "participant").await;
        let (status, _) = send(&app, "POST", "/api/v1/studies", Some(study.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let researcher = login(&app, "researcher").await;
        let (status, created) = send(&app, "POST", "/api/v1/studies", Some(study)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "active");
        assert_eq!(created["currentApplications"], 0);
        assert_eq!(created["researcherId"], researcher["id"]);
        assert_eq!(created["tags"], json!(["voice"]));
        assert_eq!(created["requirements"].as_array().unwrap().len(), 1);
        assert_eq!(created["requirements"][0]["id"], "1");

        let uri = format!(
            "/api/v1/researchers/{}/studies",
            researcher["id"].as_str().unwrap()
        );
        let (_, mine) = send(&app, "GET", &uri, None).await;
        assert_eq!(mine["total"], 1);
    }

    #[tokio::test]
    async fn test_create_study_rejects_blank_title() {
        let app = create_test_app();
        login(&app, "researcher").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/studies",
            Some(json!({
                "title": "  ",
                "description": "d",
                "category": "Survey",
                "methodology": "Survey",
                "compensation": 10,
                "duration": "5 minutes",
                "participantLimit": 100,
                "location": "remote"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apply_to_study() {
        let app = create_test_app();

        let (status, _) = send(&app, "POST", "/api/v1/studies/3/applications", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let participant = login(&app, "participant").await;
        let (status, application) = send(
            &app,
            "POST",
            "/api/v1/studies/3/applications",
            Some(json!({"motivation": "I build SaaS tools"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application["status"], "pending");
        assert_eq!(application["participantId"], participant["id"]);
        assert_eq!(application["responses"].as_array().unwrap().len(), 3);

        let (_, study) = send(&app, "GET", "/api/v1/studies/3", None).await;
        assert_eq!(study["currentApplications"], 12);
        assert_eq!(study["hasApplied"], true);

        let (_, received) = send(&app, "GET", "/api/v1/studies/3/applications", None).await;
        assert_eq!(received["total"], 1);
    }

    #[tokio::test]
    async fn test_apply_to_unknown_study() {
        let app = create_test_app();
        login(&app, "participant").await;

        let (status, _) = send(&app, "POST", "/api/v1/studies/999/applications", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(health["applications"], 2);
    }

    #[tokio::test]
    async fn test_researcher_cannot_apply() {
        let app = create_test_app();
        login(&app, "researcher").await;

        let (status, body) = send(&app, "POST", "/api/v1/studies/3/applications", Some(json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (_, study) = send(&app, "GET", "/api/v1/studies/3", None).await;
        assert_eq!(study["currentApplications"], 11);
    }

    #[tokio::test]
    async fn test_get_application() {
        let app = create_test_app();

        let (status, application) = send(&app, "GET", "/api/v1/applications/a1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(application["id"], "a1");
        assert_eq!(application["studyId"], "1");
        assert_eq!(application["status"], "approved");

        let (status, body) = send(&app, "GET", "/api/v1/applications/zzz", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_applications_for_unknown_study() {
        let app = create_test_app();

        let (status, body) = send(&app, "GET", "/api/v1/studies/999/applications", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, received) = send(&app, "GET", "/api/v1/studies/1/applications", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(received["total"], 1);
        assert_eq!(received["applications"][0]["id"], "a1");
    }

    #[tokio::test]
    async fn test_studies_by_researcher() {
        let app = create_test_app();

        let (status, list) = send(&app, "GET", "/api/v1/researchers/r1/studies", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["total"], 3);
        assert_eq!(ids(&list), vec!["1", "3", "6"]);

        let (_, list) = send(&app, "GET", "/api/v1/researchers/nobody/studies", None).await;
        assert_eq!(list["total"], 0);
    }

    #[tokio::test]
    async fn test_update_application_status() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/applications/a2/status",
            Some(json!({"status": "approved"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/applications/zzz/status",
            Some(json!({"status": "approved"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, p1) = send(&app, "GET", "/api/v1/participants/p1/applications", None).await;
        assert_eq!(p1["total"], 2);
    }

    #[tokio::test]
    async fn test_dashboards_follow_role() {
        let app = create_test_app();

        let (status, _) = send(&app, "GET", "/api/v1/dashboard/participant", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        login(&app, "participant").await;
        let (status, body) = send(&app, "GET", "/api/v1/dashboard/participant", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["availableStudies"].as_array().unwrap().len(), 3);

        let (status, _) = send(&app, "GET", "/api/v1/dashboard/researcher", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_navigate() {
        let app = create_test_app();

        let (_, body) = send(&app, "GET", "/api/v1/navigate?path=/researcher/dashboard", None).await;
        assert_eq!(body["action"], "redirect");
        assert_eq!(body["to"], "/login");

        login(&app, "participant").await;
        let (_, body) = send(&app, "GET", "/api/v1/navigate?path=/researcher/dashboard", None).await;
        assert_eq!(body["to"], "/participant/dashboard");

        let (_, body) = send(&app, "GET", "/api/v1/navigate?path=/participant/study/4", None).await;
        assert_eq!(body["action"], "render");
    }

    #[tokio::test]
    async fn test_dark_mode() {
        let app = create_test_app();

        let (_, body) = send(&app, "GET", "/api/v1/preferences/dark-mode", None).await;
        assert_eq!(body["darkMode"], false);

        let (_, body) = send(&app, "POST", "/api/v1/preferences/dark-mode/toggle", None).await;
        assert_eq!(body["darkMode"], true);

        let (_, body) = send(
            &app,
            "PUT",
            "/api/v1/preferences/dark-mode",
            Some(json!({"darkMode": false})),
        )
        .await;
        assert_eq!(body["darkMode"], false);
    }
}
