use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool call requested by the assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute, usually `<system>__<tool>`
    pub name: String,
    /// The arguments for the execution, in the order the model produced them
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Create a new ToolCall from a name and a JSON object of arguments.
    /// Anything other than an object yields an empty argument list.
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}
