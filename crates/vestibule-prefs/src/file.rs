//! JSON-file-backed preference store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{PreferenceStore, PrefsError};

/// A preference store backed by a flat JSON object on disk.
///
/// The file holds a single JSON object mapping preference keys to string
/// values. A missing file reads as an empty store; the file and its parent
/// directories are created on first write.
///
/// Access is read-modify-write on every `set`/`remove`. That is fine for the
/// intended use: a handful of small values, touched from a single thread.
///
/// # Example
///
/// ```rust
/// use vestibule_prefs::{FilePreferences, PreferenceStore};
/// # let dir = tempfile::TempDir::new().unwrap();
/// # let path = dir.path().join("preferences.json");
///
/// let store = FilePreferences::new(path);
/// store.set("theme", "dark").unwrap();
/// assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Creates a store backed by the given file path.
    ///
    /// The file is not touched until the first read or write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the conventional location for `app_name`:
    /// `<user config dir>/<app_name>/preferences.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Unavailable`] when the platform exposes no
    /// user configuration directory (restricted environments, some
    /// containers).
    pub fn for_app(app_name: &str) -> Result<Self, PrefsError> {
        let base = dirs::config_dir()
            .ok_or_else(|| PrefsError::Unavailable("no user config directory".into()))?;
        Ok(Self::new(base.join(app_name).join("preferences.json")))
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&content).map_err(|e| {
            PrefsError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| PrefsError::Corrupt(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
