//! Namika Session
//!
//! Who is logged in, and the preferences stored alongside:
//!
//! - **storage**: `KeyValueStore` trait with file and in-memory backends
//! - **store**: `SessionStore` (mock login/logout/register, restore on start)
//! - **preferences**: dark-mode flag
//! - **error**: Error types
//!
//! # Lifecycle
//!
//! ```text
//! new (Loading) → restore (Ready, maybe a user) → login / logout ...
//! ```

pub mod error;
pub mod preferences;
pub mod storage;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use preferences::{Preferences, DARK_MODE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{demo_profile, register, SessionStatus, SessionStore, DEFAULT_REGISTER_DELAY, USER_KEY};
