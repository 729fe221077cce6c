//! Message catalogs with single-hop fallback and interpolation.

use std::collections::HashMap;
use std::fmt;

use minijinja::Environment;
use serde::Serialize;
use tracing::warn;

/// Error type for catalog construction.
///
/// Only registration can fail; the lookup path is total.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog source was not valid YAML.
    Yaml(String),
    /// A value was neither a string nor a nested mapping of strings.
    InvalidEntry { key: String, detail: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Yaml(msg) => write!(f, "catalog YAML error: {}", msg),
            CatalogError::InvalidEntry { key, detail } => {
                write!(f, "invalid catalog entry '{}': {}", key, detail)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::Yaml(err.to_string())
    }
}

/// Static message maps per locale, consulted with a single-hop fallback.
///
/// Catalogs are loaded eagerly at bootstrap, from YAML documents (flat or
/// nested; nested keys flatten to dotted paths) or programmatic maps, and
/// are immutable afterwards apart from switching the active locale.
///
/// # Lookup
///
/// [`lookup`](MessageCatalog::lookup) tries the active locale, then the
/// fallback locale (one hop, never transitively), then returns the key
/// itself. It cannot fail. [`format`](MessageCatalog::format) additionally
/// renders the template with the given arguments; rendering trouble
/// degrades to the raw template.
///
/// # Example
///
/// ```rust
/// use vestibule_i18n::MessageCatalog;
///
/// let mut catalog = MessageCatalog::new("zh-CN", "en-US");
/// catalog
///     .add_locale_yaml("zh-CN", "app:\n  title: 示例\n")
///     .unwrap();
/// catalog
///     .add_locale_yaml("en-US", "app:\n  title: Demo\n  subtitle: welcome\n")
///     .unwrap();
///
/// assert_eq!(catalog.lookup("app.title"), "示例");
/// // Missing in zh-CN, provided by the one-hop fallback:
/// assert_eq!(catalog.lookup("app.subtitle"), "welcome");
/// // Missing everywhere: the key itself.
/// assert_eq!(catalog.lookup("app.footer"), "app.footer");
/// ```
pub struct MessageCatalog {
    active: String,
    fallback: String,
    messages: HashMap<String, HashMap<String, String>>,
    env: Environment<'static>,
}

impl MessageCatalog {
    /// Creates an empty catalog with the given active and fallback tags.
    pub fn new(active: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            fallback: fallback.into(),
            messages: HashMap::new(),
            env: Environment::new(),
        }
    }

    /// The locale messages resolve against first.
    pub fn active_locale(&self) -> &str {
        &self.active
    }

    /// The single-hop fallback locale.
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Switches the active locale.
    ///
    /// The tag need not have a registered catalog; lookups then serve
    /// entirely from the fallback, which is the correct degradation for a
    /// partially translated application.
    pub fn set_active(&mut self, tag: impl Into<String>) {
        self.active = tag.into();
    }

    /// Registers a programmatic message map for `tag`, merging over any
    /// existing entries for that locale.
    pub fn add_locale_map<K, V, I>(&mut self, tag: impl Into<String>, entries: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map = self.messages.entry(tag.into()).or_default();
        for (key, value) in entries {
            map.insert(key.into(), value.into());
        }
    }

    /// Registers a YAML document for `tag`.
    ///
    /// The document must be a mapping; nested mappings flatten to dotted
    /// keys (`app: {title: ...}` becomes `app.title`). Values must be
    /// scalars.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for malformed YAML or non-scalar leaf
    /// values. Registration happens at bootstrap, where configuration
    /// mistakes should surface loudly, unlike lookup, which never fails.
    pub fn add_locale_yaml(
        &mut self,
        tag: impl Into<String>,
        yaml: &str,
    ) -> Result<(), CatalogError> {
        let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let mut flat = HashMap::new();
        flatten_into("", &doc, &mut flat)?;
        self.add_locale_map(tag, flat);
        Ok(())
    }

    /// Whether `tag` has a registered catalog.
    pub fn has_locale(&self, tag: &str) -> bool {
        self.messages.contains_key(tag)
    }

    /// Number of registered locales.
    pub fn locale_count(&self) -> usize {
        self.messages.len()
    }

    /// Looks up the template for `key`: active locale, then one fallback
    /// hop, then the key itself. Total.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(template) = self.get_from(&self.active, key) {
            return template;
        }
        if self.fallback != self.active {
            if let Some(template) = self.get_from(&self.fallback, key) {
                return template;
            }
        }
        key
    }

    /// Looks up and renders the template for `key` with `args`.
    ///
    /// Rendering failure degrades to the raw template, logged as a
    /// warning; nothing in this path can abort the caller.
    pub fn format<S: Serialize>(&self, key: &str, args: S) -> String {
        let template = self.lookup(key);
        match self.env.render_str(template, args) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!("failed to render message '{key}': {err}");
                template.to_string()
            }
        }
    }

    fn get_from(&self, tag: &str, key: &str) -> Option<&str> {
        self.messages
            .get(tag)
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }
}

impl fmt::Debug for MessageCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCatalog")
            .field("active", &self.active)
            .field("fallback", &self.fallback)
            .field("locales", &self.messages.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn flatten_into(
    prefix: &str,
    value: &serde_yaml::Value,
    out: &mut HashMap<String, String>,
) -> Result<(), CatalogError> {
    match value {
        serde_yaml::Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let key = key.as_str().ok_or_else(|| CatalogError::InvalidEntry {
                    key: prefix.to_string(),
                    detail: "non-string key".into(),
                })?;
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&path, child, out)?;
            }
            Ok(())
        }
        serde_yaml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
            Ok(())
        }
        serde_yaml::Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
            Ok(())
        }
        serde_yaml::Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
            Ok(())
        }
        other => Err(CatalogError::InvalidEntry {
            key: prefix.to_string(),
            detail: format!("unsupported value: {:?}", other),
        }),
    }
}
