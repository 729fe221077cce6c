//! The binary color mode and its two parsing policies.

use std::fmt;

/// The active visual mode, applied surface-wide.
///
/// Persisted as the strings `"light"` and `"dark"`. Two parsing policies
/// exist on purpose:
///
/// - [`parse`](ColorMode::parse) is strict and used for persisted values:
///   anything outside the closed set reads as absent, so stale or
///   future-format values fall through to the next preference source.
/// - [`normalize`](ColorMode::normalize) is total and used for apply-time
///   input: every non-`"dark"` value maps to light. Bad input is a
///   safe-default case, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    #[default]
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl ColorMode {
    /// The persisted representation: `"light"` or `"dark"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// Strict closed-set parse.
    ///
    /// Returns `None` for anything that is not exactly `"light"` or
    /// `"dark"`, including case variants.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "light" => Some(ColorMode::Light),
            "dark" => Some(ColorMode::Dark),
            _ => None,
        }
    }

    /// Total normalization: `"dark"` maps to dark, every other input to
    /// light.
    ///
    /// ```rust
    /// use vestibule_theme::ColorMode;
    ///
    /// assert_eq!(ColorMode::normalize("dark"), ColorMode::Dark);
    /// assert_eq!(ColorMode::normalize("light"), ColorMode::Light);
    /// assert_eq!(ColorMode::normalize("solarized"), ColorMode::Light);
    /// assert_eq!(ColorMode::normalize(""), ColorMode::Light);
    /// ```
    pub fn normalize(value: &str) -> ColorMode {
        if value == "dark" {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    /// Maps the scheme signal's boolean to a mode.
    pub fn from_prefers_dark(prefers_dark: bool) -> ColorMode {
        if prefers_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(ColorMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for value in ["Dark", "LIGHT", "auto", "system", "", " dark", "dark "] {
            assert_eq!(ColorMode::parse(value), None, "value: {:?}", value);
        }
    }

    #[test]
    fn test_normalize_closed_set() {
        assert_eq!(ColorMode::normalize("dark"), ColorMode::Dark);
        assert_eq!(ColorMode::normalize("light"), ColorMode::Light);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(ColorMode::default(), ColorMode::Light);
    }

    #[test]
    fn test_from_prefers_dark() {
        assert_eq!(ColorMode::from_prefers_dark(true), ColorMode::Dark);
        assert_eq!(ColorMode::from_prefers_dark(false), ColorMode::Light);
    }

    proptest! {
        /// Normalize is total: dark iff the input is exactly "dark".
        #[test]
        fn prop_normalize_total(value in ".*") {
            let mode = ColorMode::normalize(&value);
            if value == "dark" {
                prop_assert_eq!(mode, ColorMode::Dark);
            } else {
                prop_assert_eq!(mode, ColorMode::Light);
            }
        }

        /// Normalize is idempotent under its own string form.
        #[test]
        fn prop_normalize_idempotent(value in ".*") {
            let once = ColorMode::normalize(&value);
            prop_assert_eq!(ColorMode::normalize(once.as_str()), once);
        }
    }
}
