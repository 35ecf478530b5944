use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::errors::ConfigError;

/// Key under which the response style preference is stored
pub const RESPONSE_STYLE_KEY: &str = "response_style";

/// How much of each tool call is shown by default
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseStyle {
    Concise,
    #[default]
    Detailed,
}

impl ResponseStyle {
    /// Read a stored preference; anything unrecognised falls back to detailed
    pub fn from_preference(value: Option<&str>) -> Self {
        value
            .and_then(|v| ResponseStyle::from_str(v).ok())
            .unwrap_or_default()
    }

    pub fn expands_tool_details(self) -> bool {
        self != ResponseStyle::Concise
    }
}

/// String key/value storage for user preferences
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
    fn remove_item(&mut self, key: &str) -> Result<(), ConfigError>;
}

/// Preferences kept as a flat JSON object in a file
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/goose/preferences.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home_dir
            .join(".config")
            .join("goose")
            .join("preferences.json"))
    }

    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, ConfigError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, items: &HashMap<String, String>) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), ConfigError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    items: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), ConfigError> {
        self.items.remove(key);
        Ok(())
    }
}

/// The stored response style. A store that can't be read counts as no preference.
pub fn response_style(store: &impl PreferenceStore) -> ResponseStyle {
    match store.get_item(RESPONSE_STYLE_KEY) {
        Ok(value) => ResponseStyle::from_preference(value.as_deref()),
        Err(e) => {
            tracing::warn!("could not read response style preference: {}", e);
            ResponseStyle::default()
        }
    }
}

pub fn set_response_style(
    store: &mut impl PreferenceStore,
    style: ResponseStyle,
) -> Result<(), ConfigError> {
    store.set_item(RESPONSE_STYLE_KEY, &style.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_style_defaults_to_detailed() {
        assert_eq!(ResponseStyle::from_preference(None), ResponseStyle::Detailed);
        assert_eq!(
            ResponseStyle::from_preference(Some("verbose")),
            ResponseStyle::Detailed
        );
        assert_eq!(
            ResponseStyle::from_preference(Some("concise")),
            ResponseStyle::Concise
        );
        assert!(ResponseStyle::Detailed.expands_tool_details());
        assert!(!ResponseStyle::Concise.expands_tool_details());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = FilePreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        assert_eq!(response_style(&store), ResponseStyle::Detailed);
        set_response_style(&mut store, ResponseStyle::Concise).unwrap();
        assert_eq!(
            store.get_item(RESPONSE_STYLE_KEY).unwrap().as_deref(),
            Some("concise")
        );
        assert_eq!(response_style(&store), ResponseStyle::Concise);

        store.remove_item(RESPONSE_STYLE_KEY).unwrap();
        assert_eq!(response_style(&store), ResponseStyle::Detailed);
    }

    #[test]
    fn test_unreadable_store_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(store.get_item(RESPONSE_STYLE_KEY).is_err());
        assert_eq!(response_style(&store), ResponseStyle::Detailed);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPreferenceStore::default();
        set_response_style(&mut store, ResponseStyle::Concise).unwrap();
        assert_eq!(response_style(&store), ResponseStyle::Concise);
    }
}
