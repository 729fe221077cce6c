//! Adaptive style collections.
//!
//! A [`Theme`] is a named collection of [`console::Style`] values that can
//! adapt to the active [`ColorMode`]. Most styles look fine in both modes;
//! only a handful need adjustment, typically foreground colors for
//! contrast. Adaptation is therefore per-style: define shared styles once
//! and override only what differs between modes.
//!
//! Applying a color mode resolves the theme into a flat [`StyleSet`] for
//! that mode, which is what views read named styles from.

use std::collections::HashMap;

use console::Style;

use crate::mode::ColorMode;

/// A named collection of styles with optional per-mode variants.
///
/// # Example
///
/// ```rust
/// use console::Style;
/// use vestibule_theme::{ColorMode, Theme};
///
/// let theme = Theme::new()
///     // Same in all modes
///     .add("title", Style::new().bold())
///     // Adaptive: base, light override, dark override
///     .add_adaptive(
///         "panel",
///         Style::new().dim(),
///         Some(Style::new().fg(console::Color::Black)),
///         Some(Style::new().fg(console::Color::White)),
///     );
///
/// let dark = theme.resolve(ColorMode::Dark);
/// assert!(dark.has("title"));
/// assert!(dark.has("panel"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Theme {
    name: Option<String>,
    base: HashMap<String, Style>,
    light: HashMap<String, Style>,
    dark: HashMap<String, Style>,
}

impl Theme {
    /// Creates an empty, unnamed theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the theme name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a non-adaptive style (same in all modes), returning `self`
    /// for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.base.insert(name.to_string(), style);
        self
    }

    /// Adds an adaptive style with separate light and dark variants.
    ///
    /// The base style is used in a mode without an override.
    pub fn add_adaptive(
        mut self,
        name: &str,
        base: Style,
        light: Option<Style>,
        dark: Option<Style>,
    ) -> Self {
        self.base.insert(name.to_string(), base);
        if let Some(style) = light {
            self.light.insert(name.to_string(), style);
        }
        if let Some(style) = dark {
            self.dark.insert(name.to_string(), style);
        }
        self
    }

    /// Resolves the flat style collection for `mode`.
    ///
    /// Every defined name appears in the result: the mode override where
    /// one exists, the base style otherwise.
    pub fn resolve(&self, mode: ColorMode) -> StyleSet {
        let overrides = match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        };

        let styles = self
            .base
            .iter()
            .map(|(name, base)| {
                let style = overrides.get(name).unwrap_or(base);
                (name.clone(), style.clone())
            })
            .collect();

        StyleSet { styles }
    }

    /// Returns true if no styles are defined.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Number of defined style names.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Number of light mode overrides.
    pub fn light_override_count(&self) -> usize {
        self.light.len()
    }

    /// Number of dark mode overrides.
    pub fn dark_override_count(&self) -> usize {
        self.dark.len()
    }
}

/// The styles of one theme resolved for one color mode.
#[derive(Debug, Clone, Default)]
pub struct StyleSet {
    styles: HashMap<String, Style>,
}

impl StyleSet {
    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Looks up a style by name, falling back to the plain style.
    ///
    /// An unknown name renders unstyled rather than failing: style names
    /// are presentation, not control flow.
    pub fn style(&self, name: &str) -> Style {
        self.styles.get(name).cloned().unwrap_or_else(Style::new)
    }

    /// Whether a style with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Number of styles in the set.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterates over the style names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}
