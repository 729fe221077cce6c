//! Theme resolution and propagation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use vestibule_prefs::PreferenceStore;

use crate::mode::ColorMode;
use crate::signal::SchemeSignal;
use crate::surface::ThemeSurface;

/// Produces the authoritative color mode and keeps it applied.
///
/// The manager owns no policy state of its own; it composes three injected
/// collaborators (the preference store, the scheme signal, and the render
/// surface) and routes every mode change through the surface capability.
///
/// # Resolution
///
/// [`resolve_initial`](ThemeManager::resolve_initial) consults sources in
/// strict order, first success wins:
///
/// 1. the persisted preference, when it parses as exactly `"light"` or
///    `"dark"`;
/// 2. the scheme signal (`matches()` true resolves dark, false light).
///
/// Storage failure is logged and treated as "no persisted value"; the
/// operation is total and never panics.
///
/// # OS changes are advisory
///
/// [`handle_scheme_change`](ThemeManager::handle_scheme_change) re-applies
/// the theme only while no persisted override exists. A persisted user
/// choice always wins until it is cleared with
/// [`clear_preference`](ThemeManager::clear_preference).
pub struct ThemeManager {
    store: Rc<dyn PreferenceStore>,
    signal: Rc<SchemeSignal>,
    surface: Rc<RefCell<dyn ThemeSurface>>,
    storage_key: String,
}

impl ThemeManager {
    /// The conventional preference key for the color mode.
    pub const DEFAULT_STORAGE_KEY: &'static str = "theme";

    /// Creates a manager over the given collaborators, using the
    /// [default storage key](Self::DEFAULT_STORAGE_KEY).
    pub fn new(
        store: Rc<dyn PreferenceStore>,
        signal: Rc<SchemeSignal>,
        surface: Rc<RefCell<dyn ThemeSurface>>,
    ) -> Self {
        Self::with_storage_key(store, signal, surface, Self::DEFAULT_STORAGE_KEY)
    }

    /// Creates a manager persisting under a custom key.
    pub fn with_storage_key(
        store: Rc<dyn PreferenceStore>,
        signal: Rc<SchemeSignal>,
        surface: Rc<RefCell<dyn ThemeSurface>>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            signal,
            surface,
            storage_key: storage_key.into(),
        }
    }

    /// The preference key this manager persists under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The live scheme signal, shared rather than copied.
    ///
    /// The view layer attaches its own listeners here (for example, to
    /// repaint when [`handle_scheme_change`] re-applies the theme).
    pub fn signal(&self) -> &Rc<SchemeSignal> {
        &self.signal
    }

    /// Reads the raw persisted value, or `None`.
    ///
    /// Storage failure is logged as a warning and reads as absent;
    /// persistence is an enhancement, never a hard dependency.
    pub fn stored_raw(&self) -> Option<String> {
        match self.store.get(&self.storage_key) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to read stored theme preference: {err}");
                None
            }
        }
    }

    /// Reads the persisted value as a mode.
    ///
    /// A value outside the closed set reads as `None` without logging;
    /// that covers first runs and future formats, and is not anomalous.
    pub fn stored(&self) -> Option<ColorMode> {
        self.stored_raw().as_deref().and_then(ColorMode::parse)
    }

    /// Resolves the initial color mode. Total; never panics.
    pub fn resolve_initial(&self) -> ColorMode {
        if let Some(mode) = self.stored() {
            return mode;
        }
        ColorMode::from_prefers_dark(self.signal.matches())
    }

    /// Applies `mode` to the surface.
    ///
    /// The sole mutation route for visual theme state. Cannot fail.
    pub fn apply(&self, mode: ColorMode) {
        self.surface.borrow_mut().set_color_scheme(mode);
    }

    /// The explicit-user-action path: applies `mode` and persists it.
    ///
    /// The value written is always a closed-set member (type-enforced).
    /// A write failure is logged and the applied mode stands for the
    /// session.
    pub fn set(&self, mode: ColorMode) {
        self.apply(mode);
        if let Err(err) = self.store.set(&self.storage_key, mode.as_str()) {
            warn!("failed to persist theme preference: {err}");
        }
    }

    /// Removes the persisted override, making OS-level changes
    /// authoritative again.
    ///
    /// Does not change the currently applied mode; the next scheme change
    /// (or an explicit apply) will.
    pub fn clear_preference(&self) {
        if let Err(err) = self.store.remove(&self.storage_key) {
            warn!("failed to clear theme preference: {err}");
        }
    }

    /// Reacts to a scheme-signal change.
    ///
    /// Re-resolves and re-applies only when no persisted override exists;
    /// otherwise the change is ignored until the override is cleared.
    pub fn handle_scheme_change(&self, prefers_dark: bool) {
        if self.stored().is_some() {
            return;
        }
        self.apply(ColorMode::from_prefers_dark(prefers_dark));
    }

    /// Subscribes [`handle_scheme_change`](Self::handle_scheme_change) to
    /// the signal.
    ///
    /// The listener holds a weak reference; it goes quiet if the manager
    /// is dropped. There is no unsubscribe; the subscription is bounded
    /// by the application's lifetime.
    pub fn follow_system(self: Rc<Self>) {
        let manager = Rc::downgrade(&self);
        self.signal.subscribe(move |prefers_dark| {
            if let Some(manager) = manager.upgrade() {
                manager.handle_scheme_change(prefers_dark);
            }
        });
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("storage_key", &self.storage_key)
            .field("signal", &self.signal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestibule_prefs::{FailingPreferences, MemoryPreferences};

    /// Surface that records every applied mode.
    #[derive(Default)]
    struct RecordingSurface {
        mode: Option<ColorMode>,
        history: Vec<ColorMode>,
    }

    impl ThemeSurface for RecordingSurface {
        fn set_color_scheme(&mut self, mode: ColorMode) {
            self.mode = Some(mode);
            self.history.push(mode);
        }

        fn color_scheme(&self) -> Option<ColorMode> {
            self.mode
        }
    }

    struct Fixture {
        store: Rc<MemoryPreferences>,
        signal: Rc<SchemeSignal>,
        surface: Rc<RefCell<RecordingSurface>>,
        manager: Rc<ThemeManager>,
    }

    fn fixture(stored: Option<&str>, prefers_dark: bool) -> Fixture {
        let store = Rc::new(match stored {
            Some(value) => MemoryPreferences::with_values([("theme", value)]),
            None => MemoryPreferences::new(),
        });
        let signal = SchemeSignal::fixed(prefers_dark);
        let surface = Rc::new(RefCell::new(RecordingSurface::default()));
        let manager = Rc::new(ThemeManager::new(
            store.clone(),
            signal.clone(),
            surface.clone(),
        ));
        Fixture {
            store,
            signal,
            surface,
            manager,
        }
    }

    // =========================================================================
    // Initial resolution
    // =========================================================================

    #[test]
    fn test_stored_value_wins_over_signal() {
        let f = fixture(Some("light"), true);
        assert_eq!(f.manager.resolve_initial(), ColorMode::Light);

        let f = fixture(Some("dark"), false);
        assert_eq!(f.manager.resolve_initial(), ColorMode::Dark);
    }

    #[test]
    fn test_empty_store_falls_back_to_signal() {
        let f = fixture(None, true);
        assert_eq!(f.manager.resolve_initial(), ColorMode::Dark);

        let f = fixture(None, false);
        assert_eq!(f.manager.resolve_initial(), ColorMode::Light);
    }

    #[test]
    fn test_invalid_stored_value_falls_back_to_signal() {
        for junk in ["auto", "Dark", "", "solarized"] {
            let f = fixture(Some(junk), true);
            assert_eq!(f.manager.resolve_initial(), ColorMode::Dark, "stored {junk:?}");
        }
    }

    #[test]
    fn test_failing_store_never_panics() {
        let surface: Rc<RefCell<RecordingSurface>> =
            Rc::new(RefCell::new(RecordingSurface::default()));
        let manager = ThemeManager::new(
            Rc::new(FailingPreferences),
            SchemeSignal::fixed(false),
            surface.clone(),
        );

        assert_eq!(manager.stored_raw(), None);
        assert_eq!(manager.stored(), None);
        assert_eq!(manager.resolve_initial(), ColorMode::Light);

        // Writes degrade the same way.
        manager.set(ColorMode::Dark);
        manager.clear_preference();
        assert_eq!(surface.borrow().color_scheme(), Some(ColorMode::Dark));
    }

    // =========================================================================
    // Apply and persist
    // =========================================================================

    #[test]
    fn test_apply_routes_through_surface() {
        let f = fixture(None, false);
        f.manager.apply(ColorMode::Dark);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Dark));
    }

    #[test]
    fn test_set_applies_and_persists_closed_set_value() {
        let f = fixture(None, false);
        f.manager.set(ColorMode::Dark);

        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Dark));
        assert_eq!(f.store.get("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_clear_preference_leaves_surface_alone() {
        let f = fixture(Some("light"), true);
        f.manager.apply(ColorMode::Light);
        f.manager.clear_preference();

        assert_eq!(f.manager.stored(), None);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Light));
    }

    // =========================================================================
    // Scheme changes
    // =========================================================================

    #[test]
    fn test_scheme_change_without_override_reapplies() {
        let f = fixture(None, false);
        f.manager.apply(f.manager.resolve_initial());
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Light));

        f.manager.handle_scheme_change(true);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Dark));
    }

    #[test]
    fn test_scheme_change_with_override_is_ignored() {
        let f = fixture(Some("light"), false);
        f.manager.apply(f.manager.resolve_initial());

        f.manager.handle_scheme_change(true);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Light));
        assert_eq!(f.surface.borrow().history.len(), 1);
    }

    #[test]
    fn test_follow_system_wires_the_signal() {
        let f = fixture(None, false);
        f.manager.apply(f.manager.resolve_initial());
        f.manager.clone().follow_system();

        f.signal.set_matches(true);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Dark));

        // An override appearing later silences the subscription.
        f.manager.set(ColorMode::Light);
        f.signal.set_matches(false);
        f.signal.set_matches(true);
        assert_eq!(f.surface.borrow().color_scheme(), Some(ColorMode::Light));
    }

    #[test]
    fn test_follow_system_goes_quiet_after_drop() {
        let f = fixture(None, false);
        f.manager.clone().follow_system();
        let surface = f.surface.clone();
        let signal = f.signal.clone();
        drop(f);

        signal.set_matches(true);
        assert_eq!(surface.borrow().color_scheme(), None);
    }
}
