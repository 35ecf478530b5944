//! Wire form of `AgentResult<T>`: `{"status": "success", "value": ...}` or
//! `{"status": "error", "error": "..."}`.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{AgentError, AgentResult};

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum WireRef<'a, T> {
    Success { value: &'a T },
    Error { error: String },
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Wire<T> {
    Success { value: T },
    Error { error: String },
}

pub fn serialize<T, S>(result: &AgentResult<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let wire = match result {
        Ok(value) => WireRef::Success { value },
        Err(e) => WireRef::Error {
            error: e.to_string(),
        },
    };
    wire.serialize(serializer)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<AgentResult<T>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    Ok(match Wire::<T>::deserialize(deserializer)? {
        Wire::Success { value } => Ok(value),
        Wire::Error { error } => Err(AgentError::ExecutionError(error)),
    })
}

/// Tool output contents. A success whose `value` is not a list reads as no
/// contents, and list items that are not text or image content are skipped.
pub mod contents {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Wire;
    use crate::errors::{AgentError, AgentResult};
    use crate::models::content::Content;

    pub use super::serialize;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<AgentResult<Vec<Content>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Wire::<Value>::deserialize(deserializer)? {
            Wire::Success { value } => Ok(from_value(value)),
            Wire::Error { error } => Err(AgentError::ExecutionError(error)),
        })
    }

    fn from_value(value: Value) -> Vec<Content> {
        let Value::Array(items) = value else {
            tracing::debug!("tool result value is not a list, showing no output");
            return Vec::new();
        };
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::debug!("skipping tool result item: {}", e);
                    None
                }
            })
            .collect()
    }
}
