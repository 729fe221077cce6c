//! # Vestibule - Application Bootstrap
//!
//! Vestibule wires a UI root to a theme-preference subsystem and a locale
//! subsystem, then mounts it. It decouples what an application shows from
//! how its visual mode and language are chosen:
//!
//! - Theme resolution with three competing sources (explicit user choice,
//!   persisted preference, OS-level preference) and a live subscription
//!   that keeps OS changes advisory ([`vestibule_theme`])
//! - Locale resolution over a finite tag set with persisted override and
//!   single-hop message fallback ([`vestibule_i18n`])
//! - A preference store the resolvers share ([`vestibule_prefs`])
//!
//! ## The Mount Sequence
//!
//! [`App::mount`] runs five strictly ordered, synchronous steps: resolve
//! locale, resolve and apply theme, inject the [`ThemeHandle`], register
//! the message catalog, mount the root. The theme is applied before the
//! root view draws anything, so the wrong theme is never visible, not
//! even for a frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use vestibule::{context::keys, App, AppContext, ThemeHandle};
//! use vestibule_i18n::{Locales, MessageCatalog};
//! use vestibule_prefs::MemoryPreferences;
//! use vestibule_theme::SchemeSignal;
//!
//! let app = App::builder()
//!     .preferences(Rc::new(MemoryPreferences::new()))
//!     .color_scheme(SchemeSignal::fixed(true)) // OS prefers dark
//!     .locales(Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US").unwrap())
//!     .catalog_yaml("zh-CN", "hello: 你好")
//!     .catalog_yaml("en-US", "hello: Hello")
//!     .root(|ctx: &AppContext| {
//!         let theme: Rc<ThemeHandle> = ctx.get(keys::THEME_HANDLE).unwrap();
//!         let messages: Rc<MessageCatalog> = ctx.get(keys::MESSAGES).unwrap();
//!         println!("{} ({})", messages.lookup("hello"), theme.initial());
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mounted = app.mount().unwrap();
//! # assert_eq!(mounted.theme().initial(), vestibule_theme::ColorMode::Dark);
//! ```
//!
//! ## Dependency Injection
//!
//! Nothing here is ambient: the store, the scheme signal, and the render
//! surface are injected through the builder, and views receive their
//! capabilities through the [`AppContext`] they are mounted with. Swap in
//! fakes for any of the three and the whole bootstrap runs under test.

pub mod context;

mod bootstrap;
mod handle;

pub use bootstrap::{App, AppBuilder, BootstrapError, MountedApp, RootView};
pub use context::AppContext;
pub use handle::ThemeHandle;

// The subsystem crates, re-exported for application code.
pub use vestibule_i18n as i18n;
pub use vestibule_prefs as prefs;
pub use vestibule_theme as theme;
