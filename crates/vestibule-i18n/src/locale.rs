//! The configured locale set and initial-locale resolution.

use std::fmt;

use tracing::warn;
use vestibule_prefs::PreferenceStore;

/// Error type for locale set configuration.
#[derive(Debug)]
pub enum LocaleError {
    /// The supported set was empty.
    Empty,
    /// The designated default is not a member of the supported set.
    UnsupportedDefault(String),
    /// The designated fallback is not a member of the supported set.
    UnsupportedFallback(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::Empty => write!(f, "locale set is empty"),
            LocaleError::UnsupportedDefault(tag) => {
                write!(f, "default locale not in supported set: {}", tag)
            }
            LocaleError::UnsupportedFallback(tag) => {
                write!(f, "fallback locale not in supported set: {}", tag)
            }
        }
    }
}

impl std::error::Error for LocaleError {}

/// The finite set of locales an application supports.
///
/// Configured once at startup: the supported tags, one designated default
/// (resolved when nothing valid is persisted) and one designated fallback
/// (consulted for message keys the active locale lacks: exactly one hop,
/// never a transitive chain).
///
/// # Example
///
/// ```rust
/// use vestibule_i18n::Locales;
///
/// let locales = Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US").unwrap();
/// assert!(locales.is_supported("en-US"));
/// assert!(!locales.is_supported("fr-FR"));
/// assert_eq!(locales.default_locale(), "zh-CN");
/// assert_eq!(locales.fallback(), "en-US");
/// ```
#[derive(Debug, Clone)]
pub struct Locales {
    supported: Vec<String>,
    default: String,
    fallback: String,
}

impl Locales {
    /// The conventional preference key for the locale.
    pub const DEFAULT_STORAGE_KEY: &'static str = "language";

    /// Creates a locale set.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] when the set is empty or when the default
    /// or fallback is not a member of it.
    pub fn new<I, T>(supported: I, default: &str, fallback: &str) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let supported: Vec<String> = supported.into_iter().map(Into::into).collect();
        if supported.is_empty() {
            return Err(LocaleError::Empty);
        }
        if !supported.iter().any(|tag| tag == default) {
            return Err(LocaleError::UnsupportedDefault(default.to_string()));
        }
        if !supported.iter().any(|tag| tag == fallback) {
            return Err(LocaleError::UnsupportedFallback(fallback.to_string()));
        }
        Ok(Self {
            supported,
            default: default.to_string(),
            fallback: fallback.to_string(),
        })
    }

    /// The supported tags, in registration order.
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// The tag resolved when nothing valid is persisted.
    pub fn default_locale(&self) -> &str {
        &self.default
    }

    /// The tag consulted for message keys the active locale lacks.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Whether `tag` is a member of the supported set. Exact match only.
    pub fn is_supported(&self, tag: &str) -> bool {
        self.supported.iter().any(|candidate| candidate == tag)
    }

    /// Resolves the initial locale from the store, under the
    /// [default key](Self::DEFAULT_STORAGE_KEY).
    ///
    /// Total: a stored member of the set wins; absent, unknown, or
    /// unreadable values resolve to the default. Storage failures are
    /// logged as warnings, never propagated.
    pub fn resolve_initial(&self, store: &dyn PreferenceStore) -> &str {
        self.resolve_initial_with_key(store, Self::DEFAULT_STORAGE_KEY)
    }

    /// Resolves the initial locale from a custom preference key.
    pub fn resolve_initial_with_key(&self, store: &dyn PreferenceStore, key: &str) -> &str {
        let stored = match store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to read stored locale preference: {err}");
                None
            }
        };

        match stored {
            Some(tag) if self.is_supported(&tag) => {
                // Return the canonical instance, not the stored copy.
                self.supported
                    .iter()
                    .find(|candidate| **candidate == tag)
                    .map(String::as_str)
                    .unwrap_or(&self.default)
            }
            _ => &self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestibule_prefs::{FailingPreferences, MemoryPreferences};

    fn demo_locales() -> Locales {
        Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US").unwrap()
    }

    #[test]
    fn test_new_validates_membership() {
        assert!(matches!(
            Locales::new(["en-US"], "fr-FR", "en-US"),
            Err(LocaleError::UnsupportedDefault(_))
        ));
        assert!(matches!(
            Locales::new(["en-US"], "en-US", "fr-FR"),
            Err(LocaleError::UnsupportedFallback(_))
        ));
        assert!(matches!(
            Locales::new(Vec::<String>::new(), "en-US", "en-US"),
            Err(LocaleError::Empty)
        ));
    }

    #[test]
    fn test_default_may_equal_fallback() {
        let locales = Locales::new(["en-US"], "en-US", "en-US").unwrap();
        assert_eq!(locales.default_locale(), "en-US");
        assert_eq!(locales.fallback(), "en-US");
    }

    #[test]
    fn test_stored_member_wins() {
        let locales = demo_locales();
        let store = MemoryPreferences::with_values([("language", "en-US")]);
        assert_eq!(locales.resolve_initial(&store), "en-US");
    }

    #[test]
    fn test_unknown_tag_resolves_to_default() {
        let locales = demo_locales();
        let store = MemoryPreferences::with_values([("language", "fr-FR")]);
        assert_eq!(locales.resolve_initial(&store), "zh-CN");
    }

    #[test]
    fn test_absent_resolves_to_default() {
        let locales = demo_locales();
        let store = MemoryPreferences::new();
        assert_eq!(locales.resolve_initial(&store), "zh-CN");
    }

    #[test]
    fn test_failing_store_resolves_to_default() {
        let locales = demo_locales();
        assert_eq!(locales.resolve_initial(&FailingPreferences), "zh-CN");
    }

    #[test]
    fn test_match_is_exact() {
        let locales = demo_locales();
        for stored in ["EN-US", "en-us", " en-US", "en"] {
            let store = MemoryPreferences::with_values([("language", stored)]);
            assert_eq!(locales.resolve_initial(&store), "zh-CN", "stored {stored:?}");
        }
    }
}
