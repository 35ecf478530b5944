use anyhow::{Context, Result};
use goose_chat::layout::Node;
use goose_chat::preferences::ResponseStyle;
use goose_chat::tool_view::feed::{ToolCallEvent, ToolCallFeed};
use goose_chat::tool_view::ToolCallWidget;

/// Events from a JSON array, or one JSON event per line
pub fn parse_events(text: &str) -> Result<Vec<ToolCallEvent>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("Failed to parse transcript array");
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Failed to parse transcript line {}", index + 1))
        })
        .collect()
}

/// Every tool call seen in a transcript, in the order their requests arrived
pub struct Replay {
    style: ResponseStyle,
    calls: Vec<(String, ToolCallFeed, ToolCallWidget)>,
}

impl Replay {
    pub fn new(style: ResponseStyle) -> Self {
        Self {
            style,
            calls: Vec::new(),
        }
    }

    fn position(&self, id: Option<&str>) -> Option<usize> {
        match id {
            Some(id) => self.calls.iter().position(|(call_id, _, _)| call_id == id),
            None if self.calls.is_empty() => None,
            None => Some(self.calls.len() - 1),
        }
    }

    /// Feed one event and refresh the views it touches
    pub fn apply(&mut self, event: ToolCallEvent) {
        match event {
            ToolCallEvent::Cancelled => {
                for (_, feed, widget) in &mut self.calls {
                    feed.push(ToolCallEvent::Cancelled);
                    if let Some(input) = feed.input() {
                        widget.update(&input);
                    }
                }
            }
            ToolCallEvent::Request(request) => {
                let index = match self.position(Some(request.id.as_str())) {
                    Some(index) => index,
                    None => {
                        self.calls.push((
                            request.id.clone(),
                            ToolCallFeed::new(),
                            ToolCallWidget::new(self.style),
                        ));
                        self.calls.len() - 1
                    }
                };
                self.push_to(index, ToolCallEvent::Request(request));
            }
            ToolCallEvent::Response(response) => match self.position(Some(response.id.as_str())) {
                Some(index) => self.push_to(index, ToolCallEvent::Response(response)),
                None => tracing::warn!(id = %response.id, "response for an unknown tool call"),
            },
            ToolCallEvent::Notification(notification) => {
                match self.position(notification.request_id.as_deref()) {
                    Some(index) => self.push_to(index, ToolCallEvent::Notification(notification)),
                    None => tracing::warn!("notification before any tool call"),
                }
            }
        }
    }

    fn push_to(&mut self, index: usize, event: ToolCallEvent) {
        let (_, feed, widget) = &mut self.calls[index];
        feed.push(event);
        if let Some(input) = feed.input() {
            widget.update(&input);
        }
    }

    pub fn layouts(&self) -> Vec<Node> {
        self.calls
            .iter()
            .filter_map(|(_, _, widget)| widget.layout())
            .collect()
    }
}
