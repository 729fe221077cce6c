//! In-memory and always-failing stores.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::store::{PreferenceStore, PrefsError};

/// An in-memory preference store.
///
/// Useful for tests and for sessions that should not touch the filesystem.
/// Values do not survive the process.
///
/// # Example
///
/// ```rust
/// use vestibule_prefs::{MemoryPreferences, PreferenceStore};
///
/// let store = MemoryPreferences::new();
/// assert_eq!(store.get("language").unwrap(), None);
/// store.set("language", "en-US").unwrap();
/// assert_eq!(store.get("language").unwrap(), Some("en-US".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given pairs.
    ///
    /// Convenient for tests that need a known starting state:
    ///
    /// ```rust
    /// use vestibule_prefs::{MemoryPreferences, PreferenceStore};
    ///
    /// let store = MemoryPreferences::with_values([("theme", "dark")]);
    /// assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
    /// ```
    pub fn with_values<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RefCell::new(values),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// A store whose every operation fails with [`PrefsError::Unavailable`].
///
/// Stands in for disabled or restricted storage so consumers can verify
/// their degradation policy: resolution must still complete and fall back
/// to the next preference source.
///
/// # Example
///
/// ```rust
/// use vestibule_prefs::{FailingPreferences, PreferenceStore};
///
/// let store = FailingPreferences;
/// assert!(store.get("theme").is_err());
/// assert!(store.set("theme", "dark").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPreferences;

impl PreferenceStore for FailingPreferences {
    fn get(&self, _key: &str) -> Result<Option<String>, PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".into()))
    }
}
