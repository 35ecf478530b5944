//! Asks the goosed sidecar to turn a finished assistant reply into schema content.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::message::Message;
use crate::schema_content::{parse_schema_response, SchemaResponse};

const PLAN_SCHEMA: &str = include_str!("schemas/plan.schema.json");

#[derive(Error, Debug)]
pub enum AskError {
    #[error("Request to /ask failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("/ask returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Response is not valid schema content: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    response: String,
}

/// The prompt that asks for schema content describing `content`
pub fn schema_prompt(content: &str) -> String {
    format!(
        r#"Analyze the following text and generate a JSON-LD response based on these rules:
1. If the text is a conversation flow question indicating nothing else to be done eg:
"I'm here and ready to assist you with any tasks or questions you have! How can I help you today?", respond with this structure:
   {{"status": "complete", "waitingForUser": true}}
2. For all other questions or presentation of rich information, create json that conforms to the JSON schema provided, based on what is being asked in the content.
### Schema:
{PLAN_SCHEMA}
### Content:
{content}
Generate ONLY the JSON, no markdown formatting or explanation:"#
    )
}

pub struct AskClient {
    client: reqwest::Client,
    base_url: String,
}

impl AskClient {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn schema_content(&self, content: &str) -> Result<SchemaResponse, AskError> {
        let prompt = schema_prompt(content);
        let response = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(&AskRequest { prompt: &prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AskError::Status(response.status()));
        }

        let body: AskResponse = response.json().await?;
        tracing::debug!(response = %body.response, "raw response from /ask");
        Ok(parse_schema_response(&body.response)?)
    }

    /// Attach schema content to a finished message, keyed by message id.
    ///
    /// Failures are logged and leave `metadata` untouched; the message simply
    /// shows without extra content.
    pub async fn on_finish(&self, message: &Message, metadata: &mut HashMap<String, SchemaResponse>) {
        let Some(id) = message.id.as_deref() else {
            tracing::debug!("finished message has no id, skipping schema content");
            return;
        };

        match self.schema_content(&message.text()).await {
            Ok(schema) => {
                metadata.insert(id.to_string(), schema);
            }
            Err(e) => tracing::warn!(message_id = id, "could not get schema content: {}", e),
        }
    }
}
