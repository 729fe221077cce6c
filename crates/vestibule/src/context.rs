//! The application context: explicit dependency injection for views.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

/// Well-known context entry names.
pub mod keys {
    /// The [`ThemeHandle`](crate::ThemeHandle) registered by the bootstrap.
    pub const THEME_HANDLE: &str = "theme";
    /// The [`MessageCatalog`](vestibule_i18n::MessageCatalog) registered by
    /// the bootstrap.
    pub const MESSAGES: &str = "messages";
}

/// Storage for shared application objects, keyed by name.
///
/// The context is how the bootstrap hands capabilities to the view tree:
/// views receive it at mount and fetch what they declare they need; there
/// is no ambient lookup. Entries are `Rc`-shared; the context owns one
/// strong reference for the lifetime of the mounted application and views
/// hold non-owning clones.
///
/// `AppContext` is cheap to clone since entries are stored as `Rc`.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use vestibule::AppContext;
///
/// let mut ctx = AppContext::new();
/// ctx.insert("answer", Rc::new(42usize));
///
/// let answer: Rc<usize> = ctx.get("answer").unwrap();
/// assert_eq!(*answer, 42);
///
/// // Wrong type reads as absent, not a panic.
/// assert!(ctx.get::<String>("answer").is_none());
/// ```
#[derive(Default, Clone)]
pub struct AppContext {
    entries: HashMap<String, Rc<dyn Any>>,
}

impl AppContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `name`, replacing any previous entry.
    pub fn insert<T: 'static>(&mut self, name: impl Into<String>, value: Rc<T>) {
        self.entries.insert(name.into(), value);
    }

    /// Fetches the entry under `name`, if present and of type `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<Rc<T>> {
        self.entries
            .get(name)
            .cloned()
            .and_then(|entry| entry.downcast::<T>().ok())
    }

    /// Whether an entry exists under `name` (of any type).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all registered entries.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
