//! Saving the values entered in a provider's configuration form.
use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::settings::ServerSettings;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Failed to save {key}: {message}")]
    Upsert { key: String, message: String },

    #[error("Provider check failed for {provider}: {message}")]
    Check { provider: String, message: String },

    #[error("Request to goosed failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigKey {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub secret: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    #[serde(default)]
    pub config_keys: Vec<ConfigKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDetails {
    pub name: String,
    #[serde(default)]
    pub metadata: ProviderMetadata,
}

/// Where configuration values are written
#[async_trait]
pub trait ConfigUpsert: Send + Sync {
    async fn upsert(&self, key: &str, value: Value, is_secret: bool) -> Result<(), SubmitError>;
}

/// Confirms a provider works with the configuration just saved
#[async_trait]
pub trait ProviderCheck: Send + Sync {
    async fn check_provider(&self, provider: &str) -> Result<(), SubmitError>;
}

/// Save a provider's form values.
///
/// When nothing is required and every key has a default, each key is saved with
/// its entered value or default and the provider is not checked. Otherwise keys
/// that were filled in or are required are saved (required ones falling back to
/// their default), then the provider is checked.
pub async fn submit_provider_config(
    store: &impl ConfigUpsert,
    checker: &impl ProviderCheck,
    provider: &ProviderDetails,
    values: &HashMap<String, String>,
) -> Result<(), SubmitError> {
    let parameters = &provider.metadata.config_keys;
    let entered = |name: &str| values.get(name).map(|v| Value::String(v.clone()));

    let all_optional_with_defaults = !parameters.is_empty()
        && parameters
            .iter()
            .all(|p| !p.required && p.default.is_some());

    if all_optional_with_defaults {
        let upserts = parameters.iter().filter_map(|param| {
            let value = entered(&param.name).or_else(|| param.default.clone())?;
            Some(store.upsert(&param.name, value, param.secret))
        });
        try_join_all(upserts).await?;
        return Ok(());
    }

    let upserts = parameters.iter().filter_map(|param| {
        let has_value = values.get(&param.name).is_some_and(|v| !v.is_empty());
        if !has_value && !param.required {
            return None;
        }
        let value = entered(&param.name).or_else(|| param.default.clone());
        match value {
            None | Some(Value::Null) => None,
            Some(value) => Some(store.upsert(&param.name, value, param.secret)),
        }
    });
    try_join_all(upserts).await?;

    tracing::info!(provider = %provider.name, "checking provider configuration");
    checker.check_provider(&provider.name).await
}

/// Talks to the configuration endpoints of a running goosed
pub struct GoosedConfigClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

impl GoosedConfigClient {
    pub fn new<S: Into<String>>(base_url: S, secret_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    pub fn from_settings(server: &ServerSettings) -> Self {
        Self::new(server.base_url(), server.secret_key.clone())
    }

    async fn post(&self, path: &str, body: Value) -> Result<reqwest::Response, SubmitError> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body);
        if let Some(key) = &self.secret_key {
            request = request.header("X-Secret-Key", key);
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl ConfigUpsert for GoosedConfigClient {
    async fn upsert(&self, key: &str, value: Value, is_secret: bool) -> Result<(), SubmitError> {
        let response = self
            .post(
                "/config/upsert",
                json!({ "key": key, "value": value, "is_secret": is_secret }),
            )
            .await?;
        if !response.status().is_success() {
            return Err(SubmitError::Upsert {
                key: key.to_string(),
                message: format!("status {}", response.status()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProviderCheck for GoosedConfigClient {
    async fn check_provider(&self, provider: &str) -> Result<(), SubmitError> {
        let response = self
            .post("/config/check_provider", json!({ "provider": provider }))
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Check {
                provider: provider.to_string(),
                message: format!("status {}: {}", status, body),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        upserts: Mutex<Vec<(String, Value, bool)>>,
        checks: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn upserted(&self) -> Vec<(String, Value, bool)> {
            let mut upserts = self.upserts.lock().unwrap().clone();
            upserts.sort_by(|a, b| a.0.cmp(&b.0));
            upserts
        }
    }

    #[async_trait]
    impl ConfigUpsert for RecordingStore {
        async fn upsert(&self, key: &str, value: Value, is_secret: bool) -> Result<(), SubmitError> {
            self.upserts
                .lock()
                .unwrap()
                .push((key.to_string(), value, is_secret));
            Ok(())
        }
    }

    #[async_trait]
    impl ProviderCheck for RecordingStore {
        async fn check_provider(&self, provider: &str) -> Result<(), SubmitError> {
            self.checks.lock().unwrap().push(provider.to_string());
            Ok(())
        }
    }

    fn key(name: &str, required: bool, default: Option<Value>, secret: bool) -> ConfigKey {
        ConfigKey {
            name: name.to_string(),
            required,
            default,
            secret,
        }
    }

    fn provider(keys: Vec<ConfigKey>) -> ProviderDetails {
        ProviderDetails {
            name: "ollama".to_string(),
            metadata: ProviderMetadata { config_keys: keys },
        }
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_all_defaults_saves_without_check() {
        let store = RecordingStore::default();
        let provider = provider(vec![
            key("OLLAMA_HOST", false, Some(json!("localhost")), false),
            key("OLLAMA_TIMEOUT", false, Some(json!(600)), false),
        ]);

        submit_provider_config(&store, &store, &provider, &values(&[("OLLAMA_HOST", "remote")]))
            .await
            .unwrap();

        assert_eq!(
            store.upserted(),
            vec![
                ("OLLAMA_HOST".into(), json!("remote"), false),
                ("OLLAMA_TIMEOUT".into(), json!(600), false),
            ]
        );
        assert!(store.checks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_required_keys_fall_back_to_defaults_then_check() {
        let store = RecordingStore::default();
        let provider = provider(vec![
            key("API_KEY", true, None, true),
            key("HOST", true, Some(json!("https://api.example.com")), false),
            key("ORG", false, None, false),
            key("PROJECT", false, Some(json!("p")), false),
            key("REGION", true, None, false),
        ]);

        submit_provider_config(
            &store,
            &store,
            &provider,
            &values(&[("API_KEY", "sk-1"), ("ORG", "")]),
        )
        .await
        .unwrap();

        assert_eq!(
            store.upserted(),
            vec![
                ("API_KEY".into(), json!("sk-1"), true),
                ("HOST".into(), json!("https://api.example.com"), false),
            ]
        );
        assert_eq!(*store.checks.lock().unwrap(), vec!["ollama".to_string()]);
    }

    #[tokio::test]
    async fn test_no_keys_still_checks() {
        let store = RecordingStore::default();
        submit_provider_config(&store, &store, &provider(vec![]), &HashMap::new())
            .await
            .unwrap();
        assert!(store.upserted().is_empty());
        assert_eq!(store.checks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_goosed_client_sends_secret_header() {
        let mut server = mockito::Server::new_async().await;
        let upsert = server
            .mock("POST", "/config/upsert")
            .match_header("x-secret-key", "s3cret")
            .match_body(Matcher::Json(
                json!({"key": "API_KEY", "value": "sk-1", "is_secret": true}),
            ))
            .with_status(200)
            .create_async()
            .await;
        let check = server
            .mock("POST", "/config/check_provider")
            .match_body(Matcher::Json(json!({"provider": "openai"})))
            .with_status(400)
            .with_body("bad key")
            .create_async()
            .await;

        let client = GoosedConfigClient::new(server.url(), Some("s3cret".into()));
        client.upsert("API_KEY", json!("sk-1"), true).await.unwrap();
        let err = client.check_provider("openai").await.unwrap_err();
        assert!(err.to_string().contains("bad key"));

        upsert.assert_async().await;
        check.assert_async().await;
    }
}
