use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Directories searched for tools the assistant launches, in priority order
#[derive(Debug, Clone)]
pub struct SearchPaths {
    paths: Vec<PathBuf>,
}

impl SearchPaths {
    /// Configured paths first, then the usual user-level install locations
    pub fn builder(configured: &[String]) -> Self {
        let mut paths: Vec<String> = configured.to_vec();

        if cfg!(unix) {
            paths.push("/usr/local/bin".to_string());
            paths.push("~/.local/bin".to_string());
        }

        if cfg!(target_os = "macos") {
            paths.push("/opt/homebrew/bin".to_string());
        }

        Self {
            paths: paths
                .iter()
                .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
                .collect(),
        }
    }

    /// Also search the npm global bin directory
    pub fn with_npm(mut self) -> Self {
        if cfg!(windows) {
            if let Some(appdata) = dirs::data_dir() {
                self.paths.push(appdata.join("npm"));
            }
        } else if let Some(home) = dirs::home_dir() {
            self.paths.push(home.join(".npm-global").join("bin"));
        }
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// A `PATH` value with these directories ahead of the inherited `PATH`
    pub fn env_var(self) -> Result<OsString, ConfigError> {
        self.join_with(env::var_os("PATH"))
    }

    fn join_with(self, inherited: Option<OsString>) -> Result<OsString, ConfigError> {
        let inherited: Vec<PathBuf> = inherited
            .as_ref()
            .map(env::split_paths)
            .into_iter()
            .flatten()
            .collect();

        env::join_paths(self.paths.into_iter().chain(inherited))
            .map_err(|e| ConfigError::InvalidPath(e.to_string()))
    }

    /// The first search path holding a file called `name`
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.paths
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| Path::is_file(candidate))
    }
}
