pub mod ask;
pub mod errors;
pub mod layout;
pub mod models;
pub mod preferences;
pub mod provider_config;
pub mod schema_content;
pub mod search_path;
pub mod settings;
pub mod sidecar;
pub mod tool_view;
