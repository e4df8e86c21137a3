//! Session Store
//!
//! Tracks who is logged in. Login is a local mock: any credentials are
//! accepted and a demo profile is fabricated for the requested role. The user
//! is written to key-value storage so a later process picks it up again via
//! [`SessionStore::restore`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::session::error::{SessionError, SessionResult};
use crate::session::storage::KeyValueStore;
use crate::store::types::{ParticipantProfile, Profile, ResearcherProfile, User, UserType};

/// Storage key holding the JSON-encoded logged-in user
pub const USER_KEY: &str = "namikaUser";

/// Default wait of the mock registration
pub const DEFAULT_REGISTER_DELAY: Duration = Duration::from_millis(1000);

/// Whether the stored session has been looked at yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// `restore` has not run; callers should show a loading state
    Loading,
    Ready,
}

/// The current user session
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    user: Option<User>,
    status: SessionStatus,
    register_delay: Duration,
}

impl SessionStore {
    /// Create a session over `storage`. Nothing is read until `restore`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            user: None,
            status: SessionStatus::Loading,
            register_delay: DEFAULT_REGISTER_DELAY,
        }
    }

    pub fn with_register_delay(mut self, delay: Duration) -> Self {
        self.register_delay = delay;
        self
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn register_delay(&self) -> Duration {
        self.register_delay
    }

    /// Load a previously stored user, if any.
    ///
    /// The session is `Ready` afterwards even when the stored value turns out
    /// to be unreadable; that case reports `SessionError::Corrupt` and leaves
    /// nobody logged in.
    pub fn restore(&mut self) -> SessionResult<Option<&User>> {
        self.user = None;
        let stored = self.storage.get(USER_KEY);
        self.status = SessionStatus::Ready;

        let Some(raw) = stored? else {
            tracing::debug!("No stored session");
            return Ok(None);
        };

        let user: User = serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt {
            key: USER_KEY.to_string(),
            error: e.to_string(),
        })?;

        tracing::info!(user_id = %user.id, user_type = %user.user_type(), "Restored session");
        self.user = Some(user);
        Ok(self.user.as_ref())
    }

    /// Log in as a freshly fabricated demo user of the given role.
    ///
    /// The password is not checked. Fails only if the user cannot be stored.
    pub fn login(&mut self, email: &str, _password: &str, user_type: UserType) -> SessionResult<&User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            profile: demo_profile(user_type),
            created_at: Utc::now(),
        };

        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.status = SessionStatus::Ready;

        tracing::info!(user_id = %user.id, %user_type, email, "Logged in");
        Ok(&*self.user.insert(user))
    }

    /// Forget the current user here and in storage
    ///
    /// The in-memory user is cleared even when removing the stored copy fails.
    pub fn logout(&mut self) -> SessionResult<()> {
        let user = self.user.take();
        let removed = self.storage.remove(USER_KEY);
        match (&user, &removed) {
            (Some(user), Ok(())) => tracing::info!(user_id = %user.id, "Logged out"),
            (_, Err(e)) => tracing::warn!(error = %e, "Logged out, but stored user could not be removed"),
            (None, Ok(())) => {}
        }
        removed
    }
}

/// Mock registration: waits `delay` and creates nothing
pub async fn register(data: &serde_json::Value, delay: Duration) {
    let email = data.get("email").and_then(|v| v.as_str()).unwrap_or("<none>");
    tracing::info!(email, delay_ms = delay.as_millis() as u64, "Registration requested");
    tokio::time::sleep(delay).await;
    tracing::debug!(email, "Registration finished (nothing created)");
}

/// Profile handed to every demo login of a role
pub fn demo_profile(user_type: UserType) -> Profile {
    match user_type {
        UserType::Researcher => Profile::Researcher(ResearcherProfile {
            company_name: "TechCorp Inc.".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Johnson".to_string(),
            title: "UX Research Lead".to_string(),
            website: Some("https://techcorp.com".to_string()),
            description: "Leading UX research initiatives for innovative products.".to_string(),
            verified: true,
            studies_posted: 12,
            total_spent: 15600.0,
            rating: 4.8,
        }),
        UserType::Participant => Profile::Participant(ParticipantProfile {
            first_name: "Alex".to_string(),
            last_name: "Chen".to_string(),
            age: 28,
            location: "San Francisco, CA".to_string(),
            occupation: "Software Engineer".to_string(),
            experience: vec![
                "Web Development".to_string(),
                "Mobile Apps".to_string(),
                "SaaS".to_string(),
            ],
            interests: vec![
                "Technology".to_string(),
                "Design".to_string(),
                "Productivity".to_string(),
            ],
            total_earnings: 2400.0,
            studies_completed: 18,
            rating: 4.9,
            verified: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::{FileStore, MemoryStore};
    use tempfile::tempdir;

    fn memory_session() -> (SessionStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (SessionStore::new(storage.clone()), storage)
    }

    /// Storage that keeps values but cannot delete them
    struct StickyStore(MemoryStore);

    impl KeyValueStore for StickyStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            self.0.set(key, value)
        }

        fn remove(&self, _key: &str) -> SessionResult<()> {
            Err(SessionError::Lock("storage is read-only".to_string()))
        }
    }

    #[test]
    fn test_logout_clears_user_when_storage_fails() {
        let storage = Arc::new(StickyStore(MemoryStore::new()));
        let mut session = SessionStore::new(storage.clone());
        session
            .login("jane@example.com", "x", UserType::Participant)
            .unwrap();

        assert!(matches!(session.logout(), Err(SessionError::Lock(_))));
        assert!(session.current_user().is_none());
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn test_new_session_is_loading() {
        let (session, _) = memory_session();
        assert!(session.is_loading());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_restore_without_stored_user() {
        let (mut session, _) = memory_session();
        assert!(session.restore().unwrap().is_none());
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn test_login_yields_requested_type() {
        let (mut session, storage) = memory_session();

        for user_type in UserType::all() {
            let user = session.login("someone@example.com", "wrong", *user_type).unwrap();
            assert_eq!(user.user_type(), *user_type);
            assert_eq!(user.email, "someone@example.com");
        }

        assert!(storage.get(USER_KEY).unwrap().is_some());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_login_assigns_fresh_ids() {
        let (mut session, _) = memory_session();
        let first = session.login("a@example.com", "", UserType::Participant).unwrap().id.clone();
        let second = session.login("a@example.com", "", UserType::Participant).unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_restart_restores_same_user() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileStore::new(dir.path()));

        let mut session = SessionStore::new(storage.clone());
        session.restore().unwrap();
        let user = session
            .login("sarah@techcorp.com", "pw", UserType::Researcher)
            .unwrap()
            .clone();
        drop(session);

        let mut restarted = SessionStore::new(Arc::new(FileStore::new(dir.path())));
        let restored = restarted.restore().unwrap().cloned();

        assert_eq!(restored, Some(user));
        assert_eq!(restarted.current_user().map(|u| u.is_researcher()), Some(true));
    }

    #[test]
    fn test_logout_clears_storage_and_user() {
        let (mut session, storage) = memory_session();
        session.login("a@example.com", "", UserType::Participant).unwrap();

        session.logout().unwrap();

        assert!(session.current_user().is_none());
        assert!(storage.get(USER_KEY).unwrap().is_none());

        let mut restarted = SessionStore::new(storage);
        assert!(restarted.restore().unwrap().is_none());
    }

    #[test]
    fn test_restore_reports_corrupt_value() {
        let (mut session, storage) = memory_session();
        storage.set(USER_KEY, "{not json").unwrap();

        let err = session.restore().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
        assert!(!session.is_loading());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_demo_profiles() {
        let researcher = demo_profile(UserType::Researcher);
        assert_eq!(researcher.first_name(), "Sarah");
        assert_eq!(researcher.as_researcher().map(|p| p.company_name.as_str()), Some("TechCorp Inc."));

        let participant = demo_profile(UserType::Participant);
        assert_eq!(participant.first_name(), "Alex");
        assert_eq!(participant.rating(), 4.9);
    }

    #[tokio::test]
    async fn test_register_waits_and_creates_nothing() {
        let (session, storage) = memory_session();
        let data = serde_json::json!({ "email": "new@example.com", "type": "participant" });

        let started = std::time::Instant::now();
        register(&data, Duration::from_millis(20)).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(storage.get(USER_KEY).unwrap().is_none());
        assert!(session.current_user().is_none());
        assert_eq!(session.register_delay(), DEFAULT_REGISTER_DELAY);
    }
}
