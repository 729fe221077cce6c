//! # Vestibule Theme - Color Mode Resolution and Adaptive Styling
//!
//! `vestibule-theme` determines and maintains an application's active color
//! mode (light/dark) and carries the adaptive style collections that respond
//! to it.
//!
//! ## Core Concepts
//!
//! - [`ColorMode`]: the binary visual mode, light or dark
//! - [`SchemeSignal`]: live, subscribable "does the OS prefer dark" signal
//! - [`ThemeSurface`]: the capability through which a mode is made visible
//! - [`Theme`] / [`StyleSet`]: named styles with per-mode variants
//! - [`ThemeManager`]: resolution and propagation, the one place that
//!   decides which mode is active
//!
//! ## Resolution Order
//!
//! The active mode is resolved from competing sources, first match wins:
//!
//! 1. An explicit user action in this session ([`ThemeManager::set`])
//! 2. The persisted preference, when it is exactly `"light"` or `"dark"`
//! 3. The OS-level preference from the scheme signal
//! 4. Light, when the signal is unavailable
//!
//! A persisted user choice always wins over OS-level changes: after the
//! initial resolution, a scheme-signal change re-applies the theme only
//! while no persisted override exists.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use console::Style;
//! use vestibule_prefs::MemoryPreferences;
//! use vestibule_theme::{
//!     ColorMode, SchemeSignal, TerminalSurface, Theme, ThemeManager, ThemeSurface,
//! };
//!
//! let theme = Theme::new()
//!     .add("title", Style::new().bold())
//!     .add_adaptive(
//!         "panel",
//!         Style::new().dim(),
//!         Some(Style::new().fg(console::Color::Black)), // light mode
//!         Some(Style::new().fg(console::Color::White)), // dark mode
//!     );
//!
//! let store = Rc::new(MemoryPreferences::new());
//! let signal = SchemeSignal::fixed(true); // OS prefers dark
//! let surface = Rc::new(RefCell::new(TerminalSurface::new(theme)));
//!
//! let manager = ThemeManager::new(store, signal, surface.clone());
//! let initial = manager.resolve_initial();
//! assert_eq!(initial, ColorMode::Dark);
//!
//! manager.apply(initial);
//! assert_eq!(surface.borrow().color_scheme(), Some(ColorMode::Dark));
//! ```
//!
//! ## Failure Policy
//!
//! Preference storage is an enhancement, never a hard dependency. Storage
//! failures are logged as warnings and treated as "no persisted value";
//! nothing in this crate can prevent an application from starting.

mod manager;
mod mode;
mod signal;
mod styles;
mod surface;

pub use manager::ThemeManager;
pub use mode::ColorMode;
pub use signal::SchemeSignal;
pub use styles::{StyleSet, Theme};
pub use surface::{TerminalSurface, ThemeSurface};
