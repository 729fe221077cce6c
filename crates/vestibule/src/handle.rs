//! The theme handle views receive through the context.

use std::rc::Rc;

use vestibule_theme::{ColorMode, SchemeSignal, ThemeManager};

/// The theme capability injected into the view tree.
///
/// Created once at bootstrap and registered in the [`AppContext`] under
/// [`keys::THEME_HANDLE`]; views hold non-owning clones. The handle
/// carries the resolved initial mode and delegates every mutation to the
/// [`ThemeManager`], so the surface invariant (resolved mode == visible
/// mode) holds no matter who calls.
///
/// [`AppContext`]: crate::AppContext
/// [`keys::THEME_HANDLE`]: crate::context::keys::THEME_HANDLE
///
/// # Example
///
/// A view toggling the theme on user request:
///
/// ```rust,ignore
/// let theme: Rc<ThemeHandle> = ctx.get(keys::THEME_HANDLE).unwrap();
/// let next = match theme.stored().unwrap_or(theme.initial()) {
///     ColorMode::Light => ColorMode::Dark,
///     ColorMode::Dark => ColorMode::Light,
/// };
/// theme.set(next); // applies and persists
/// ```
#[derive(Debug)]
pub struct ThemeHandle {
    manager: Rc<ThemeManager>,
    initial: ColorMode,
}

impl ThemeHandle {
    /// Creates a handle over a manager with its resolved initial mode.
    ///
    /// Normally called by the bootstrap; exposed for embedders that wire
    /// their own mount sequence.
    pub fn new(manager: Rc<ThemeManager>, initial: ColorMode) -> Self {
        Self { manager, initial }
    }

    /// The mode resolved at bootstrap.
    pub fn initial(&self) -> ColorMode {
        self.initial
    }

    /// The preference key the theme persists under.
    pub fn storage_key(&self) -> &str {
        self.manager.storage_key()
    }

    /// The live scheme signal (shared, not a copy) for views that react
    /// to OS-level changes.
    pub fn signal(&self) -> &Rc<SchemeSignal> {
        self.manager.signal()
    }

    /// The persisted preference, when valid. See [`ThemeManager::stored`].
    pub fn stored(&self) -> Option<ColorMode> {
        self.manager.stored()
    }

    /// The raw persisted value. See [`ThemeManager::stored_raw`].
    pub fn stored_raw(&self) -> Option<String> {
        self.manager.stored_raw()
    }

    /// Applies `mode` without persisting it.
    pub fn apply(&self, mode: ColorMode) {
        self.manager.apply(mode);
    }

    /// Applies and persists `mode`: the explicit-user-choice path.
    pub fn set(&self, mode: ColorMode) {
        self.manager.set(mode);
    }

    /// Clears the persisted override so OS-level changes apply again.
    pub fn clear_preference(&self) {
        self.manager.clear_preference();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use vestibule_prefs::MemoryPreferences;
    use vestibule_theme::{TerminalSurface, Theme, ThemeSurface};

    fn handle() -> (ThemeHandle, Rc<RefCell<TerminalSurface>>, Rc<MemoryPreferences>) {
        let store = Rc::new(MemoryPreferences::new());
        let surface = Rc::new(RefCell::new(TerminalSurface::new(Theme::new())));
        let manager = Rc::new(ThemeManager::new(
            store.clone(),
            SchemeSignal::fixed(false),
            surface.clone(),
        ));
        let initial = manager.resolve_initial();
        (ThemeHandle::new(manager, initial), surface, store)
    }

    #[test]
    fn test_initial_is_frozen_at_creation() {
        let (handle, _, _) = handle();
        assert_eq!(handle.initial(), ColorMode::Light);

        handle.set(ColorMode::Dark);
        // The handle's initial records what bootstrap resolved, not the
        // current mode.
        assert_eq!(handle.initial(), ColorMode::Light);
    }

    #[test]
    fn test_set_applies_and_persists() {
        let (handle, surface, store) = handle();
        handle.set(ColorMode::Dark);

        assert_eq!(surface.borrow().color_scheme(), Some(ColorMode::Dark));
        assert_eq!(
            vestibule_prefs::PreferenceStore::get(&*store, handle.storage_key()).unwrap(),
            Some("dark".to_string())
        );
        assert_eq!(handle.stored(), Some(ColorMode::Dark));
    }

    #[test]
    fn test_clear_preference_removes_override() {
        let (handle, _, _) = handle();
        handle.set(ColorMode::Dark);
        handle.clear_preference();
        assert_eq!(handle.stored(), None);
    }
}
