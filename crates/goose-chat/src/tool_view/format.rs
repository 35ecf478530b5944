use serde_json::{Map, Value};

/// Longest argument value shown inline in the header before it is cut
pub const MAX_COMPACT_LENGTH: usize = 30;

/// Separator between a system's name and its tool's name
const NAMESPACE_SEPARATOR: &str = "__";

/// `developer__run_shell_command` -> `Run Shell Command`
pub fn display_tool_name(name: &str) -> String {
    let tool = name
        .rfind(NAMESPACE_SEPARATOR)
        .map_or(name, |i| &name[i + NAMESPACE_SEPARATOR.len()..]);
    snake_to_title_case(tool)
}

pub fn snake_to_title_case(s: &str) -> String {
    s.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A one line summary of the arguments for the collapsed header.
///
/// A single argument shows as `key: value` with long values cut, several
/// arguments show just their keys.
pub fn compact_arguments(arguments: &Map<String, Value>) -> Option<String> {
    match arguments.len() {
        0 => None,
        1 => arguments.iter().next().map(|(key, value)| {
            format!("{}: {}", key, truncate(&value_to_string(value), MAX_COMPACT_LENGTH))
        }),
        _ => Some(
            arguments
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// One row of the full argument listing
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentLine {
    pub depth: usize,
    pub key: Option<String>,
    pub value: Option<ArgumentValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Text(String),
    Number(String),
    Bool(bool),
    Null,
}

/// Flatten arguments into indented rows; nested objects and lists open a new level
pub fn argument_lines(arguments: &Map<String, Value>) -> Vec<ArgumentLine> {
    let mut lines = Vec::new();
    push_object(arguments, 0, &mut lines);
    lines
}

fn push_object(map: &Map<String, Value>, depth: usize, lines: &mut Vec<ArgumentLine>) {
    for (key, value) in map {
        push_value(Some(key.clone()), value, depth, lines);
    }
}

fn push_value(key: Option<String>, value: &Value, depth: usize, lines: &mut Vec<ArgumentLine>) {
    let scalar = match value {
        Value::Object(map) => {
            lines.push(ArgumentLine { depth, key, value: None });
            push_object(map, depth + 1, lines);
            return;
        }
        Value::Array(items) => {
            lines.push(ArgumentLine { depth, key, value: None });
            for item in items {
                push_value(Some("-".to_string()), item, depth + 1, lines);
            }
            return;
        }
        Value::String(s) => ArgumentValue::Text(s.clone()),
        Value::Number(n) => ArgumentValue::Number(n.to_string()),
        Value::Bool(b) => ArgumentValue::Bool(*b),
        Value::Null => ArgumentValue::Null,
    };
    lines.push(ArgumentLine {
        depth,
        key,
        value: Some(scalar),
    });
}
