//! The render-surface capability.

use console::Style;

use crate::mode::ColorMode;
use crate::styles::{StyleSet, Theme};

/// The capability through which a resolved color mode becomes visible.
///
/// This is the sole mutation point for visual theme state: every code path
/// that changes the active mode routes through
/// [`set_color_scheme`](ThemeSurface::set_color_scheme), so the surface and
/// the resolved mode can never disagree outside a single atomic apply.
///
/// The trait exists so the resolution core is unit-testable without a real
/// terminal; tests use a recording implementation.
pub trait ThemeSurface {
    /// Makes `mode` the visible color scheme.
    ///
    /// Total and idempotent: applying the same mode twice leaves the
    /// surface in the same state as applying it once.
    fn set_color_scheme(&mut self, mode: ColorMode);

    /// The currently visible color scheme, or `None` before the first
    /// apply.
    fn color_scheme(&self) -> Option<ColorMode>;
}

/// The terminal implementation of [`ThemeSurface`].
///
/// Owns a [`Theme`] and keeps two things in sync on every apply: the mode
/// marker and the [`StyleSet`] resolved for that mode. Views read named
/// styles from the active set.
///
/// # Example
///
/// ```rust
/// use console::Style;
/// use vestibule_theme::{ColorMode, TerminalSurface, Theme, ThemeSurface};
///
/// let theme = Theme::new().add("title", Style::new().bold());
/// let mut surface = TerminalSurface::new(theme);
///
/// surface.set_color_scheme(ColorMode::Dark);
/// assert_eq!(surface.color_scheme(), Some(ColorMode::Dark));
/// let title = surface.style("title");
/// ```
#[derive(Debug, Default)]
pub struct TerminalSurface {
    theme: Theme,
    mode: Option<ColorMode>,
    active: StyleSet,
}

impl TerminalSurface {
    /// Creates a surface for `theme`. No styles are active until the
    /// first apply.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            mode: None,
            active: StyleSet::default(),
        }
    }

    /// The style collection resolved for the active mode.
    pub fn styles(&self) -> &StyleSet {
        &self.active
    }

    /// Looks up a named style from the active set, plain when unknown.
    pub fn style(&self, name: &str) -> Style {
        self.active.style(name)
    }

    /// The theme this surface renders.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl ThemeSurface for TerminalSurface {
    fn set_color_scheme(&mut self, mode: ColorMode) {
        self.mode = Some(mode);
        self.active = self.theme.resolve(mode);
    }

    fn color_scheme(&self) -> Option<ColorMode> {
        self.mode
    }
}
