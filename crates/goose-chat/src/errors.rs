use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read or write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid search path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}
