//! # Namika
//!
//! Data layer of a research-study marketplace: researchers post studies,
//! participants browse them and apply, and both sides follow progress on a
//! dashboard.
//!
//! ## Modules
//!
//! - [`store`]: Studies, applications and the views derived from them
//! - [`session`]: Mock login, stored session and display preferences
//! - [`navigation`]: Page table and role-based access guard
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use namika::session::{MemoryStore, SessionStore};
//! use namika::store::{BrowseFilter, StudyStore, UserType};
//! use std::sync::Arc;
//!
//! let mut session = SessionStore::new(Arc::new(MemoryStore::new()));
//! session.restore().unwrap();
//! let user = session.login("alex@example.com", "secret", UserType::Participant).unwrap().clone();
//!
//! let mut store = StudyStore::seeded();
//! store.apply_to_study("4", &user.id, Vec::new());
//! assert!(store.has_applied(&user.id, "4"));
//!
//! let filter = BrowseFilter::new().min_compensation(100.0);
//! assert!(filter
//!     .apply(store.studies())
//!     .iter()
//!     .all(|s| s.compensation >= 100.0));
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    ApplicationStatus, BrowseFilter, NewStudy, ParticipantOverview, ResearcherOverview,
    ScreeningResponse, Study, StudyApplication, StudyCategory, StudyLocation, StudyMethodology,
    StudyStatus, StudyStore, User, UserType,
};

pub use session::{
    FileStore, KeyValueStore, MemoryStore, Preferences, SessionError, SessionResult,
    SessionStatus, SessionStore,
};

pub use navigation::{navigate, Navigation, Route};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
