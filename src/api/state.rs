//! Application State
//!
//! Shared state accessible by all API handlers.
//! Each store sits behind its own lock, so one handler mutates at a time and
//! its change is complete before the next handler reads.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::session::{Preferences, SessionStore};
use crate::store::{StudyStore, User, UserType};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Studies and applications
    pub studies: Arc<RwLock<StudyStore>>,
    /// Logged-in user
    pub session: Arc<RwLock<SessionStore>>,
    /// Display preferences
    pub preferences: Preferences,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        studies: StudyStore,
        session: SessionStore,
        preferences: Preferences,
        config: ApiConfig,
    ) -> Self {
        Self {
            studies: Arc::new(RwLock::new(studies)),
            session: Arc::new(RwLock::new(session)),
            preferences,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Snapshot of the logged-in user
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.current_user().cloned()
    }

    /// The logged-in user, provided it has `role`
    pub async fn require_role(&self, role: UserType) -> ApiResult<User> {
        let user = self
            .current_user()
            .await
            .ok_or_else(|| ApiError::Unauthorized("login required".to_string()))?;

        if user.user_type() != role {
            return Err(ApiError::Forbidden(format!(
                "only a {} can do this, logged in as {}",
                role,
                user.user_type()
            )));
        }

        Ok(user)
    }
}
