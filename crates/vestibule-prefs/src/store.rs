//! The storage trait and error type.

use std::fmt;

/// Error type for preference store operations.
///
/// Consumers are expected to catch these at the point of use and degrade to
/// "value absent"; see the crate-level documentation.
#[derive(Debug)]
pub enum PrefsError {
    /// The backing storage could not be reached at all (no config
    /// directory, store constructed in a restricted context, etc.).
    Unavailable(String),
    /// I/O error reading or writing the backing file.
    Io(std::io::Error),
    /// The backing file exists but does not contain a valid preference map.
    Corrupt(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Unavailable(msg) => write!(f, "preference storage unavailable: {}", msg),
            PrefsError::Io(err) => write!(f, "preference I/O error: {}", err),
            PrefsError::Corrupt(msg) => write!(f, "preference data corrupt: {}", msg),
        }
    }
}

impl std::error::Error for PrefsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrefsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PrefsError {
    fn from(err: std::io::Error) -> Self {
        PrefsError::Io(err)
    }
}

/// String-keyed, string-valued preference storage.
///
/// All methods take `&self`: applications hold a store behind `Rc` and the
/// resolvers share it. Implementations are free to use interior mutability;
/// access is single-threaded (see the Vestibule concurrency model).
///
/// # Contract
///
/// - `get` returns `Ok(None)` for keys that were never written, including
///   when the backing file does not exist yet.
/// - `set` followed by `get` on the same key returns the written value.
/// - `remove` on an absent key is a no-op, not an error.
/// - Errors describe storage trouble only. Implementations never interpret
///   values; validation belongs to the consumer.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), PrefsError>;
}
