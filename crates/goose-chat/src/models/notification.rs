use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method carried by log line notifications
pub const LOG_METHOD: &str = "notifications/message";
/// Method carried by progress notifications
pub const PROGRESS_METHOD: &str = "notifications/progress";

/// An out-of-band event sent by a system while one of its tools is running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// The tool request this notification belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub message: NotificationMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl NotificationEvent {
    pub fn new<S: Into<String>>(method: S, params: Value) -> Self {
        Self {
            request_id: None,
            message: NotificationMessage {
                method: method.into(),
                params,
            },
        }
    }

    pub fn with_request_id<S: Into<String>>(mut self, request_id: S) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.message.method
    }

    pub fn params(&self) -> &Value {
        &self.message.params
    }
}
