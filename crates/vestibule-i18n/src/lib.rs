//! # Vestibule I18n - Locale Resolution and Message Catalogs
//!
//! `vestibule-i18n` selects the active locale for an application and serves
//! translated message templates for it.
//!
//! ## Core Concepts
//!
//! - [`Locales`]: the finite set of supported tags with one designated
//!   default and one designated fallback, fixed at startup
//! - [`MessageCatalog`]: eager, static message maps per locale, with
//!   template interpolation and a single-hop fallback
//!
//! ## Resolution
//!
//! The active locale resolves once, at startup: a persisted value that is
//! a member of the configured set wins; anything else (absent, unknown
//! tag, storage failure) resolves to the default. The operation is total
//! and never fails closed.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use vestibule_i18n::{Locales, MessageCatalog};
//! use vestibule_prefs::MemoryPreferences;
//!
//! let locales = Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US").unwrap();
//!
//! let store = MemoryPreferences::with_values([("language", "en-US")]);
//! let active = locales.resolve_initial(&store);
//! assert_eq!(active, "en-US");
//!
//! let mut catalog = MessageCatalog::new(active, locales.fallback());
//! catalog.add_locale_yaml("en-US", "greeting: \"Hello, {{ name }}!\"").unwrap();
//! catalog.add_locale_yaml("zh-CN", "greeting: \"你好，{{ name }}！\"").unwrap();
//!
//! let args = HashMap::from([("name", "Ada")]);
//! assert_eq!(catalog.format("greeting", &args), "Hello, Ada!");
//! ```
//!
//! ## Failure Policy
//!
//! Nothing in the lookup path can fail: a key missing from the active
//! locale falls back exactly one hop, and a key missing everywhere renders
//! as the key itself. Interpolation errors degrade to the raw template and
//! are logged as warnings.

mod catalog;
mod locale;

pub use catalog::{CatalogError, MessageCatalog};
pub use locale::{LocaleError, Locales};
