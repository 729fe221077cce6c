//! `welcome` - a complete worked example of a Vestibule-based app.
//!
//! Prints a localized, themed greeting. Demonstrates the full bootstrap:
//! file-backed preferences, the OS color-scheme signal, an adaptive theme,
//! embedded message catalogs, and the explicit-user-choice paths.
//!
//! ```text
//! welcome                  # greet, following persisted/OS preferences
//! welcome Ada              # greet Ada
//! welcome --theme dark     # pin the theme to dark (persisted)
//! welcome --clear-theme    # follow the OS appearance again
//! welcome --lang en-US     # persist a language preference
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::Style;
use tracing::warn;

use vestibule::context::keys;
use vestibule::i18n::{Locales, MessageCatalog};
use vestibule::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use vestibule::theme::{ColorMode, SchemeSignal, TerminalSurface, Theme};
use vestibule::{App, AppContext, RootView, ThemeHandle};

const ZH_CN: &str = include_str!("locales/zh-CN.yaml");
const EN_US: &str = include_str!("locales/en-US.yaml");

#[derive(Parser)]
#[command(name = "welcome", about = "Vestibule demo: a themed, localized greeting")]
struct Cli {
    /// Name to greet.
    #[arg(default_value = "world")]
    name: String,

    /// Pin the theme (persisted; wins over the OS preference until cleared).
    #[arg(long, value_enum, conflicts_with = "clear_theme")]
    theme: Option<ThemeChoice>,

    /// Drop the persisted theme and follow the OS appearance again.
    #[arg(long)]
    clear_theme: bool,

    /// Persist a language preference (zh-CN or en-US).
    #[arg(long)]
    lang: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
}

impl From<ThemeChoice> for ColorMode {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => ColorMode::Light,
            ThemeChoice::Dark => ColorMode::Dark,
        }
    }
}

/// The demo's adaptive theme: the banner and hint tones differ between
/// light and dark terminals, the title does not.
fn demo_theme() -> Theme {
    Theme::named("welcome")
        .add("title", Style::new().bold())
        .add_adaptive(
            "banner",
            Style::new().cyan(),
            Some(Style::new().blue()),
            Some(Style::new().cyan()),
        )
        .add_adaptive(
            "hint",
            Style::new().dim(),
            Some(Style::new().black().dim()),
            Some(Style::new().white().dim()),
        )
}

/// The root view: everything it needs arrives through the context.
struct Greeting {
    name: String,
    surface: Rc<RefCell<TerminalSurface>>,
}

impl RootView for Greeting {
    fn mount(&mut self, ctx: &AppContext) -> Result<()> {
        let theme: Rc<ThemeHandle> = ctx
            .get(keys::THEME_HANDLE)
            .ok_or_else(|| anyhow::anyhow!("theme handle missing from context"))?;
        let messages: Rc<MessageCatalog> = ctx
            .get(keys::MESSAGES)
            .ok_or_else(|| anyhow::anyhow!("message catalog missing from context"))?;

        let surface = self.surface.borrow();
        let title = surface.style("title");
        let banner = surface.style("banner");
        let hint = surface.style("hint");

        println!("{}", title.apply_to(messages.lookup("app.title")));

        let args = HashMap::from([("name", self.name.as_str())]);
        println!("{}", banner.apply_to(messages.format("greeting", &args)));

        let mode_args = HashMap::from([("mode", theme.initial().as_str())]);
        println!("{}", hint.apply_to(messages.format("mode.current", &mode_args)));

        let status_key = if theme.stored().is_some() {
            "mode.overridden"
        } else {
            "mode.follows_os"
        };
        println!("{}", hint.apply_to(messages.lookup(status_key)));

        let lang_args = HashMap::from([("tag", messages.active_locale())]);
        println!(
            "{}",
            hint.apply_to(messages.format("language.current", &lang_args))
        );

        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store: Rc<dyn PreferenceStore> = match FilePreferences::for_app("welcome") {
        Ok(prefs) => Rc::new(prefs),
        Err(err) => {
            warn!("preferences unavailable, running ephemeral: {err}");
            Rc::new(MemoryPreferences::new())
        }
    };

    let locales = Locales::new(["zh-CN", "en-US"], "zh-CN", "en-US")?;

    // Language switching is persist-then-resolve: write the preference
    // first so this run already resolves to it.
    if let Some(lang) = &cli.lang {
        if !locales.is_supported(lang) {
            anyhow::bail!("unsupported language: {lang} (try zh-CN or en-US)");
        }
        if let Err(err) = store.set(Locales::DEFAULT_STORAGE_KEY, lang) {
            warn!("failed to persist language preference: {err}");
        }
    }

    let surface = Rc::new(RefCell::new(TerminalSurface::new(demo_theme())));

    let mounted = App::builder()
        .preferences(store)
        .color_scheme(SchemeSignal::os())
        .surface(surface.clone())
        .locales(locales)
        .catalog_yaml("zh-CN", ZH_CN)
        .catalog_yaml("en-US", EN_US)
        .root(Greeting {
            name: cli.name.clone(),
            surface: surface.clone(),
        })
        .build()?
        .mount()?;

    // Explicit user choices run through the handle after mount: the same
    // apply-and-persist path a settings screen would use.
    let theme = mounted.theme();
    if cli.clear_theme {
        theme.clear_preference();
    }
    if let Some(choice) = cli.theme {
        theme.set(choice.into());
    }

    Ok(())
}
