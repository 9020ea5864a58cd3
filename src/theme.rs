//! Light/dark theme preference.
//!
//! The preference lives in a key-value store under [`THEME_KEY`]. The
//! applied theme and the stored value are written together on every change.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AqiError;

/// Store key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Binary display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("unknown theme: {s} (expected: light, dark)")),
        }
    }
}

/// Minimal string key-value persistence.
pub trait KeyValueStore {
    /// Read a value, `None` when unset.
    fn get(&self, key: &str) -> Result<Option<String>, AqiError>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AqiError>;
}

/// Store backed by a flat JSON object on disk.
///
/// A missing file reads as empty. Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, AqiError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AqiError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AqiError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), key, value, "preference saved");
        Ok(())
    }
}

/// Theme state kept in sync with its store.
#[derive(Debug)]
pub struct ThemeToggle<S> {
    store: S,
    applied: Theme,
    persisted: Option<Theme>,
}

impl<S: KeyValueStore> ThemeToggle<S> {
    /// Read the saved preference; light when unset or unreadable.
    pub fn load(store: S) -> Result<Self, AqiError> {
        let persisted = match store.get(THEME_KEY)? {
            Some(raw) => match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!("ignoring saved theme: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            store,
            applied: persisted.unwrap_or_default(),
            persisted,
        })
    }

    /// Currently applied theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.applied
    }

    /// Apply and persist `theme`. A no-op when both already match.
    pub fn set(&mut self, theme: Theme) -> Result<(), AqiError> {
        if self.applied == theme && self.persisted == Some(theme) {
            return Ok(());
        }
        self.store.set(THEME_KEY, theme.as_str())?;
        self.persisted = Some(theme);
        self.applied = theme;
        Ok(())
    }

    /// Flip the theme, returning the new value.
    pub fn toggle(&mut self) -> Result<Theme, AqiError> {
        let next = self.applied.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Give the store back, e.g. to reload from it.
    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory store.
    #[derive(Debug, Default, Clone)]
    struct MemoryStore {
        entries: HashMap<String, String>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, AqiError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), AqiError> {
            self.entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Counts writes so idempotence is observable.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, AqiError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), AqiError> {
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_default_is_light() {
        let toggle = ThemeToggle::load(MemoryStore::default()).unwrap();
        assert_eq!(toggle.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_updates_store() {
        let mut toggle = ThemeToggle::load(MemoryStore::default()).unwrap();
        assert_eq!(toggle.toggle().unwrap(), Theme::Dark);

        let store = toggle.into_store();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut toggle = ThemeToggle::load(CountingStore::default()).unwrap();
        toggle.set(Theme::Dark).unwrap();
        toggle.set(Theme::Dark).unwrap();
        assert_eq!(toggle.current(), Theme::Dark);
        assert_eq!(toggle.into_store().writes, 1);
    }

    #[test]
    fn test_setting_default_still_persists() {
        let mut toggle = ThemeToggle::load(CountingStore::default()).unwrap();
        toggle.set(Theme::Light).unwrap();
        let store = toggle.into_store();
        assert_eq!(store.writes, 1);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_survives_reload() {
        let mut toggle = ThemeToggle::load(MemoryStore::default()).unwrap();
        toggle.set(Theme::Dark).unwrap();

        let reloaded = ThemeToggle::load(toggle.into_store()).unwrap();
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_garbage_value_falls_back_to_light() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        let toggle = ThemeToggle::load(store).unwrap();
        assert_eq!(toggle.current(), Theme::Light);
    }

    #[test]
    fn test_file_store_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut toggle = ThemeToggle::load(FileStore::new(&path)).unwrap();
        assert_eq!(toggle.current(), Theme::Light);
        toggle.toggle().unwrap();

        let reloaded = ThemeToggle::load(FileStore::new(&path)).unwrap();
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("prefs.json"));
        store.set("other", "value").unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
