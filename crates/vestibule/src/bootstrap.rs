//! Composing the resolvers and mounting the root view.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;
use vestibule_i18n::{CatalogError, LocaleError, Locales, MessageCatalog};
use vestibule_prefs::{MemoryPreferences, PreferenceStore};
use vestibule_theme::{SchemeSignal, TerminalSurface, Theme, ThemeManager, ThemeSurface};

use crate::context::{keys, AppContext};
use crate::handle::ThemeHandle;

/// Error type for bootstrap configuration.
///
/// Every variant is a configuration mistake or a failure inside the root
/// view itself. Preference-storage or scheme-signal trouble never raises
/// one: preference resolution must never prevent the application from
/// mounting.
#[derive(Debug)]
pub enum BootstrapError {
    /// No locale set was configured.
    MissingLocales,
    /// No root view was configured.
    MissingRoot,
    /// The default locale has no registered catalog.
    MissingCatalog(String),
    /// A catalog source failed to parse.
    Catalog(CatalogError),
    /// Locale set construction error.
    Locale(LocaleError),
    /// The root view failed to mount.
    Mount(anyhow::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::MissingLocales => write!(f, "no locale set configured"),
            BootstrapError::MissingRoot => write!(f, "no root view configured"),
            BootstrapError::MissingCatalog(tag) => {
                write!(f, "no catalog registered for default locale: {}", tag)
            }
            BootstrapError::Catalog(err) => write!(f, "catalog error: {}", err),
            BootstrapError::Locale(err) => write!(f, "locale error: {}", err),
            BootstrapError::Mount(err) => write!(f, "mount error: {}", err),
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Catalog(err) => Some(err),
            BootstrapError::Locale(err) => Some(err),
            BootstrapError::Mount(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<CatalogError> for BootstrapError {
    fn from(err: CatalogError) -> Self {
        BootstrapError::Catalog(err)
    }
}

impl From<LocaleError> for BootstrapError {
    fn from(err: LocaleError) -> Self {
        BootstrapError::Locale(err)
    }
}

/// The single interface the bootstrap requires of a UI tree.
///
/// Implementations receive the [`AppContext`] and fetch the capabilities
/// they declare they need (theme handle, message catalog, application
/// services). A blanket implementation exists for closures.
pub trait RootView {
    /// Mounts the view. Called exactly once, after the theme is applied.
    fn mount(&mut self, ctx: &AppContext) -> Result<(), anyhow::Error>;
}

impl<F> RootView for F
where
    F: FnMut(&AppContext) -> Result<(), anyhow::Error>,
{
    fn mount(&mut self, ctx: &AppContext) -> Result<(), anyhow::Error> {
        (self)(ctx)
    }
}

enum CatalogSource {
    Yaml(String),
    Map(HashMap<String, String>),
}

/// Builder for configuring an [`App`].
///
/// # Defaults
///
/// - preferences: in-memory (ephemeral); pass a
///   [`FilePreferences`](vestibule_prefs::FilePreferences) for values that
///   survive runs
/// - scheme signal: the OS-backed signal
/// - surface: a [`TerminalSurface`] over the configured theme
///
/// A locale set, a catalog for its default locale, and a root view are
/// required; [`build`](AppBuilder::build) reports what is missing.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use vestibule::{App, AppContext};
/// use vestibule_i18n::Locales;
/// use vestibule_prefs::MemoryPreferences;
/// use vestibule_theme::SchemeSignal;
///
/// let app = App::builder()
///     .preferences(Rc::new(MemoryPreferences::new()))
///     .color_scheme(SchemeSignal::fixed(false))
///     .locales(Locales::new(["en-US"], "en-US", "en-US").unwrap())
///     .catalog_yaml("en-US", "title: Demo")
///     .root(|_ctx: &AppContext| Ok(()))
///     .build()
///     .unwrap();
///
/// let mounted = app.mount().unwrap();
/// assert!(mounted.context().contains("theme"));
/// ```
#[derive(Default)]
pub struct AppBuilder {
    store: Option<Rc<dyn PreferenceStore>>,
    signal: Option<Rc<SchemeSignal>>,
    surface: Option<Rc<RefCell<dyn ThemeSurface>>>,
    theme: Option<Theme>,
    theme_key: Option<String>,
    locale_key: Option<String>,
    locales: Option<Locales>,
    catalogs: Vec<(String, CatalogSource)>,
    context: AppContext,
    root: Option<Box<dyn RootView>>,
}

impl AppBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preference store both resolvers read and write.
    pub fn preferences(mut self, store: Rc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the color-scheme signal.
    pub fn color_scheme(mut self, signal: Rc<SchemeSignal>) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Sets the render surface explicitly, overriding the default
    /// [`TerminalSurface`].
    pub fn surface(mut self, surface: Rc<RefCell<dyn ThemeSurface>>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets the adaptive theme the default surface resolves styles from.
    ///
    /// Ignored when an explicit [`surface`](Self::surface) is configured.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Overrides the preference key for the color mode.
    pub fn theme_storage_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = Some(key.into());
        self
    }

    /// Overrides the preference key for the locale.
    pub fn locale_storage_key(mut self, key: impl Into<String>) -> Self {
        self.locale_key = Some(key.into());
        self
    }

    /// Sets the supported locale set. Required.
    pub fn locales(mut self, locales: Locales) -> Self {
        self.locales = Some(locales);
        self
    }

    /// Registers a YAML message catalog for `tag`.
    ///
    /// Parsed at [`build`](Self::build); a malformed document fails the
    /// build, not a later lookup.
    pub fn catalog_yaml(mut self, tag: impl Into<String>, yaml: impl Into<String>) -> Self {
        self.catalogs
            .push((tag.into(), CatalogSource::Yaml(yaml.into())));
        self
    }

    /// Registers a programmatic message catalog for `tag`.
    pub fn catalog_map<K, V, I>(mut self, tag: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.catalogs.push((tag.into(), CatalogSource::Map(map)));
        self
    }

    /// Registers an application object in the context under `name`.
    ///
    /// Available to the root view at mount alongside the bootstrap's own
    /// entries.
    pub fn context<T: 'static>(mut self, name: impl Into<String>, value: Rc<T>) -> Self {
        self.context.insert(name, value);
        self
    }

    /// Sets the root view. Required.
    pub fn root<V: RootView + 'static>(mut self, view: V) -> Self {
        self.root = Some(Box::new(view));
        self
    }

    /// Validates the configuration and constructs the [`App`].
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the locale set or root view is
    /// missing, a catalog fails to parse, or the default locale has no
    /// catalog.
    pub fn build(self) -> Result<App, BootstrapError> {
        let locales = self.locales.ok_or(BootstrapError::MissingLocales)?;
        let root = self.root.ok_or(BootstrapError::MissingRoot)?;

        let mut catalog = MessageCatalog::new(locales.default_locale(), locales.fallback());
        for (tag, source) in self.catalogs {
            match source {
                CatalogSource::Yaml(yaml) => catalog.add_locale_yaml(tag, &yaml)?,
                CatalogSource::Map(map) => catalog.add_locale_map(tag, map),
            }
        }

        if !catalog.has_locale(locales.default_locale()) {
            return Err(BootstrapError::MissingCatalog(
                locales.default_locale().to_string(),
            ));
        }
        for tag in locales.supported() {
            if !catalog.has_locale(tag) {
                warn!("supported locale has no catalog, fallback will serve it: {tag}");
            }
        }

        let store = self
            .store
            .unwrap_or_else(|| Rc::new(MemoryPreferences::new()));
        let signal = self.signal.unwrap_or_else(SchemeSignal::os);
        let surface = self.surface.unwrap_or_else(|| {
            Rc::new(RefCell::new(TerminalSurface::new(
                self.theme.unwrap_or_default(),
            )))
        });

        Ok(App {
            store,
            signal,
            surface,
            theme_key: self
                .theme_key
                .unwrap_or_else(|| ThemeManager::DEFAULT_STORAGE_KEY.to_string()),
            locale_key: self
                .locale_key
                .unwrap_or_else(|| Locales::DEFAULT_STORAGE_KEY.to_string()),
            locales,
            catalog,
            context: self.context,
            root,
        })
    }
}

impl fmt::Debug for AppBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBuilder")
            .field("locales", &self.locales)
            .field("catalogs", &self.catalogs.len())
            .field("has_root", &self.root.is_some())
            .finish()
    }
}

/// A configured application, ready to mount.
pub struct App {
    store: Rc<dyn PreferenceStore>,
    signal: Rc<SchemeSignal>,
    surface: Rc<RefCell<dyn ThemeSurface>>,
    theme_key: String,
    locale_key: String,
    locales: Locales,
    catalog: MessageCatalog,
    context: AppContext,
    root: Box<dyn RootView>,
}

impl App {
    /// Creates a new builder.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Runs the bootstrap sequence and mounts the root view.
    ///
    /// The sequence is strictly ordered and synchronous:
    ///
    /// 1. resolve the initial locale and activate the message subsystem;
    /// 2. resolve the initial color mode and apply it, before the root
    ///    view draws anything, so the wrong theme is never visible;
    /// 3. register the [`ThemeHandle`] in the context and attach the
    ///    advisory OS-change listener;
    /// 4. register the message catalog in the context;
    /// 5. mount the root view.
    ///
    /// # Errors
    ///
    /// Only the root view's own failure surfaces here. Storage and signal
    /// trouble has already degraded to defaults by this point.
    pub fn mount(mut self) -> Result<MountedApp, BootstrapError> {
        // 1. Locale before anything renders text.
        let active = self
            .locales
            .resolve_initial_with_key(self.store.as_ref(), &self.locale_key)
            .to_string();
        self.catalog.set_active(active);

        // 2. Theme applied before mount: no flash of the wrong theme.
        let manager = Rc::new(ThemeManager::with_storage_key(
            self.store.clone(),
            self.signal.clone(),
            self.surface.clone(),
            self.theme_key.clone(),
        ));
        let initial = manager.resolve_initial();
        manager.apply(initial);

        // 3. The handle under its well-known name; OS changes advisory.
        let handle = Rc::new(ThemeHandle::new(manager.clone(), initial));
        manager.follow_system();
        self.context.insert(keys::THEME_HANDLE, handle.clone());

        // 4. Messages under their well-known name.
        let catalog = Rc::new(self.catalog);
        self.context.insert(keys::MESSAGES, catalog.clone());

        // 5. Hand the tree its context.
        self.root
            .mount(&self.context)
            .map_err(BootstrapError::Mount)?;

        Ok(MountedApp {
            context: self.context,
            theme: handle,
            catalog,
        })
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("theme_key", &self.theme_key)
            .field("locale_key", &self.locale_key)
            .field("locales", &self.locales)
            .finish()
    }
}

/// A mounted application.
///
/// Owns the context (and through it the injected handles) for the
/// application's lifetime.
pub struct MountedApp {
    context: AppContext,
    theme: Rc<ThemeHandle>,
    catalog: Rc<MessageCatalog>,
}

impl MountedApp {
    /// The application context the root view was mounted with.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// The theme handle the bootstrap registered.
    pub fn theme(&self) -> &Rc<ThemeHandle> {
        &self.theme
    }

    /// The message catalog the bootstrap registered.
    pub fn messages(&self) -> &Rc<MessageCatalog> {
        &self.catalog
    }

    /// Re-reads the OS color-scheme preference, dispatching change
    /// listeners. Hosts call this from their event loop.
    pub fn poll_scheme(&self) {
        self.theme.signal().poll();
    }
}

impl fmt::Debug for MountedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedApp")
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> AppBuilder {
        App::builder()
            .preferences(Rc::new(MemoryPreferences::new()))
            .color_scheme(SchemeSignal::fixed(false))
            .locales(Locales::new(["en-US"], "en-US", "en-US").unwrap())
            .catalog_map("en-US", [("title", "Demo")])
    }

    #[test]
    fn test_build_requires_locales() {
        let result = App::builder().root(|_: &AppContext| Ok(())).build();
        assert!(matches!(result, Err(BootstrapError::MissingLocales)));
    }

    #[test]
    fn test_build_requires_root() {
        let result = App::builder()
            .locales(Locales::new(["en-US"], "en-US", "en-US").unwrap())
            .catalog_map("en-US", [("k", "v")])
            .build();
        assert!(matches!(result, Err(BootstrapError::MissingRoot)));
    }

    #[test]
    fn test_build_requires_default_locale_catalog() {
        let result = App::builder()
            .locales(Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US").unwrap())
            .catalog_map("en-US", [("k", "v")])
            .root(|_: &AppContext| Ok(()))
            .build();
        assert!(matches!(result, Err(BootstrapError::MissingCatalog(tag)) if tag == "zh-CN"));
    }

    #[test]
    fn test_build_rejects_bad_catalog_yaml() {
        let result = minimal_builder()
            .catalog_yaml("en-US", "broken: [")
            .root(|_: &AppContext| Ok(()))
            .build();
        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }

    #[test]
    fn test_mount_registers_well_known_entries() {
        let mounted = minimal_builder()
            .root(|_: &AppContext| Ok(()))
            .build()
            .unwrap()
            .mount()
            .unwrap();

        assert!(mounted
            .context()
            .get::<ThemeHandle>(keys::THEME_HANDLE)
            .is_some());
        assert!(mounted
            .context()
            .get::<MessageCatalog>(keys::MESSAGES)
            .is_some());
    }

    #[test]
    fn test_root_view_failure_surfaces_as_mount_error() {
        let result = minimal_builder()
            .root(|_: &AppContext| Err(anyhow::anyhow!("root exploded")))
            .build()
            .unwrap()
            .mount();
        assert!(matches!(result, Err(BootstrapError::Mount(_))));
    }
}
