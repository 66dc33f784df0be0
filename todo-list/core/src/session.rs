//! Client-side session persistence.
//!
//! The session is a single user id kept in a durable key/value store (browser
//! localStorage in the web app). A stored id is trusted until the server says
//! otherwise; there is no local expiry.

use crate::model::UserId;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Failure while writing to the backing store.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Storage write failed: {0}")]
pub struct StorageError(pub String);

/// Minimal string key/value store the session is persisted into.
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory storage used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// The persisted login session.
#[derive(Debug)]
pub struct Session<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> Session<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Returns the stored user id, or `None` if it is missing or not a whole
    /// finite number.
    pub fn user_id(&self) -> Option<UserId> {
        let raw = self.storage.read(&self.key)?;
        parse_user_id(&raw)
    }

    /// Persists `id`, replacing any previous value.
    pub fn set_user_id(&self, id: UserId) {
        if let Err(e) = self.storage.write(&self.key, &id.to_string()) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    /// Forgets the stored user id. Calling this without a session is a no-op.
    pub fn clear_user_id(&self) {
        self.storage.remove(&self.key);
    }

    #[cfg(test)]
    fn storage(&self) -> &S {
        &self.storage
    }
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    // Values written by other clients may use float notation ("7.0", "7e0").
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<MemoryStorage> {
        Session::new(MemoryStorage::default(), "userId")
    }

    #[test]
    fn empty_storage_has_no_session() {
        assert_eq!(session().user_id(), None);
    }

    #[test]
    fn set_then_get_returns_id() {
        // Arrange
        let session = session();

        // Act
        session.set_user_id(7);

        // Assert
        assert_eq!(session.user_id(), Some(7));
        assert_eq!(session.storage().read("userId"), Some("7".to_string()));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let session = session();

        session.set_user_id(7);
        session.set_user_id(12);

        assert_eq!(session.user_id(), Some(12));
    }

    #[test]
    fn clear_always_leaves_no_session() {
        let session = session();
        session.clear_user_id();
        assert_eq!(session.user_id(), None);

        session.set_user_id(3);
        session.clear_user_id();
        session.clear_user_id();

        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn garbage_values_fail_closed() {
        let storage = MemoryStorage::default();
        let session = Session::new(&storage, "userId");

        for raw in ["", "   ", "abc", "NaN", "Infinity", "7.5", "1e400", "null"] {
            storage.write("userId", raw).unwrap();
            assert_eq!(session.user_id(), None, "value {raw:?} should be rejected");
        }
    }

    #[test]
    fn float_notation_of_whole_numbers_is_accepted() {
        let storage = MemoryStorage::default();
        let session = Session::new(&storage, "userId");

        storage.write("userId", " 7.0 ").unwrap();

        assert_eq!(session.user_id(), Some(7));
    }

    #[test]
    fn key_is_configurable() {
        let storage = MemoryStorage::default();
        let session = Session::new(&storage, "todo-session");

        session.set_user_id(5);

        assert_eq!(storage.read("todo-session"), Some("5".to_string()));
        assert_eq!(storage.read("userId"), None);
    }
}
