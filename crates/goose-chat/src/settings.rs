use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::ConfigError;
use crate::preferences::{self, PreferenceStore, ResponseStyle};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sent as `X-Secret-Key` to goosed
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secret_key: None,
        }
    }
}

impl ServerSettings {
    /// Where the goosed sidecar listens
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    /// Overrides the stored preference when set
    #[serde(default)]
    pub response_style: Option<ResponseStyle>,
    /// Extra directories searched for executables, before the built-in ones
    #[serde(default)]
    pub search_paths: Vec<String>,
}

impl Settings {
    /// Defaults, then `config_file` if it exists, then `GOOSE_*` environment variables
    pub fn new(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("GOOSE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("search_paths")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::from(err)
        })?;
        Ok(settings)
    }

    /// The configured style if any, else the stored preference
    pub fn response_style(&self, store: &impl PreferenceStore) -> ResponseStyle {
        self.response_style
            .unwrap_or_else(|| preferences::response_style(store))
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{set_response_style, MemoryPreferenceStore};
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("GOOSE_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new(None).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.base_url(), "http://127.0.0.1:3000");
        assert_eq!(settings.response_style, None);
        assert!(settings.search_paths.is_empty());
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("GOOSE_SERVER__PORT", "8080");
        env::set_var("GOOSE_RESPONSE_STYLE", "concise");
        env::set_var("GOOSE_SEARCH_PATHS", "/opt/tools/bin,~/bin");

        let settings = Settings::new(None).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.response_style, Some(ResponseStyle::Concise));
        assert_eq!(settings.search_paths, vec!["/opt/tools/bin", "~/bin"]);

        // Clean up
        env::remove_var("GOOSE_SERVER__PORT");
        env::remove_var("GOOSE_RESPONSE_STYLE");
        env::remove_var("GOOSE_SEARCH_PATHS");
    }

    #[test]
    #[serial]
    fn test_config_file_layer() {
        clean_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "response_style = \"detailed\"\n[server]\nport = 4000\n").unwrap();

        let settings = Settings::new(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.response_style, Some(ResponseStyle::Detailed));

        // A missing file is not an error
        let settings = Settings::new(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_style_falls_back_to_preference() {
        let mut store = MemoryPreferenceStore::default();
        set_response_style(&mut store, ResponseStyle::Concise).unwrap();

        let settings = Settings::default();
        assert_eq!(settings.response_style(&store), ResponseStyle::Concise);

        let settings = Settings {
            response_style: Some(ResponseStyle::Detailed),
            ..Settings::default()
        };
        assert_eq!(settings.response_style(&store), ResponseStyle::Detailed);
    }
}
