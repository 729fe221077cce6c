//! # Vestibule Prefs - Preference Storage
//!
//! `vestibule-prefs` provides the key/value preference store that the
//! Vestibule resolvers (theme, locale) read and write. It is a deliberately
//! small surface: string keys, string values, and three backends.
//!
//! ## Core Concepts
//!
//! - [`PreferenceStore`]: the storage trait both resolvers are injected with
//! - [`FilePreferences`]: JSON-file-backed store under the user config dir
//! - [`MemoryPreferences`]: in-memory store for tests and ephemeral sessions
//! - [`FailingPreferences`]: a store that errors on every access, for
//!   exercising degradation policy in consumer tests
//!
//! ## Design
//!
//! Persistence is an enhancement, never a hard dependency: consumers are
//! expected to catch [`PrefsError`] at the point of use and treat it as
//! "value absent". Nothing in this crate panics on storage failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use vestibule_prefs::{MemoryPreferences, PreferenceStore};
//!
//! let store = MemoryPreferences::new();
//! store.set("theme", "dark").unwrap();
//! assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
//!
//! store.remove("theme").unwrap();
//! assert_eq!(store.get("theme").unwrap(), None);
//! ```

mod file;
mod memory;
mod store;

pub use file::FilePreferences;
pub use memory::{FailingPreferences, MemoryPreferences};
pub use store::{PreferenceStore, PrefsError};
