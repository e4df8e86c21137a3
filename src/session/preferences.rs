//! Display preferences kept next to the session

use std::sync::Arc;

use crate::session::error::{SessionError, SessionResult};
use crate::session::storage::KeyValueStore;

/// Storage key holding the JSON boolean dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// Persisted UI preferences
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Dark mode flag, `false` when never set
    pub fn dark_mode(&self) -> SessionResult<bool> {
        match self.storage.get(DARK_MODE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt {
                key: DARK_MODE_KEY.to_string(),
                error: e.to_string(),
            }),
            None => Ok(false),
        }
    }

    pub fn set_dark_mode(&self, enabled: bool) -> SessionResult<()> {
        self.storage
            .set(DARK_MODE_KEY, &serde_json::to_string(&enabled)?)?;
        tracing::debug!(enabled, "Dark mode updated");
        Ok(())
    }

    /// Flip dark mode and return the new value
    pub fn toggle_dark_mode(&self) -> SessionResult<bool> {
        let enabled = !self.dark_mode()?;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::{FileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn test_dark_mode_defaults_to_false() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        assert!(!prefs.dark_mode().unwrap());
    }

    #[test]
    fn test_toggle_dark_mode() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));

        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(prefs.dark_mode().unwrap());
        assert!(!prefs.toggle_dark_mode().unwrap());
    }

    #[test]
    fn test_dark_mode_is_stored_as_json_boolean() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileStore::new(dir.path()));
        Preferences::new(storage.clone()).set_dark_mode(true).unwrap();

        assert_eq!(storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert!(Preferences::new(storage).dark_mode().unwrap());
    }

    #[test]
    fn test_corrupt_dark_mode_value() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(DARK_MODE_KEY, "maybe").unwrap();

        let err = Preferences::new(storage).dark_mode().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }
}
