use crate::models::content::Content;
use crate::models::message::ToolResponse;

/// Results at or above this priority open their output panel on their own
pub const EXPAND_PRIORITY_THRESHOLD: f64 = 0.5;

/// A tool result the user should see
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleResult {
    pub result: Content,
    pub is_expand_tool_results: bool,
}

/// Pick the results of a successful response that are meant for the user.
///
/// Anything but a successful response yields nothing.
pub fn filter_results(response: Option<&ToolResponse>) -> Vec<VisibleResult> {
    let Some(Ok(contents)) = response.map(|r| &r.tool_result) else {
        return Vec::new();
    };

    contents
        .iter()
        .filter(|content| content.is_user_visible())
        .map(|content| VisibleResult {
            result: content.clone(),
            is_expand_tool_results: content.priority().unwrap_or(-1.0)
                >= EXPAND_PRIORITY_THRESHOLD,
        })
        .collect()
}
