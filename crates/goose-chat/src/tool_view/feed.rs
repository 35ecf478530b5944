use serde::{Deserialize, Serialize};

use super::ToolCallInput;
use crate::models::message::{ToolRequest, ToolResponse};
use crate::models::notification::NotificationEvent;

/// Something the message stream delivered about one tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ToolCallEvent {
    Request(ToolRequest),
    Response(ToolResponse),
    Notification(NotificationEvent),
    /// The user stopped the reply this tool call belongs to
    Cancelled,
}

/// Accumulates the events of a single tool call as they arrive
#[derive(Debug, Clone, Default)]
pub struct ToolCallFeed {
    request: Option<ToolRequest>,
    response: Option<ToolResponse>,
    notifications: Vec<NotificationEvent>,
    cancelled: bool,
}

impl ToolCallFeed {
    pub fn new() -> Self {
        Self::default()
    }

    fn belongs(&self, id: Option<&str>) -> bool {
        match (self.request.as_ref(), id) {
            (Some(request), Some(id)) => request.id == id,
            _ => true,
        }
    }

    /// Record an event. Returns false when the event was for a different tool call.
    pub fn push(&mut self, event: ToolCallEvent) -> bool {
        match event {
            ToolCallEvent::Request(request) => {
                if let Some(existing) = &self.request {
                    if existing.id != request.id {
                        tracing::warn!(
                            existing = %existing.id,
                            received = %request.id,
                            "ignoring request for a different tool call"
                        );
                        return false;
                    }
                }
                self.request = Some(request);
            }
            ToolCallEvent::Response(response) => {
                if !self.belongs(Some(&response.id)) {
                    tracing::warn!(id = %response.id, "ignoring response for a different tool call");
                    return false;
                }
                self.response = Some(response);
            }
            ToolCallEvent::Notification(notification) => {
                if !self.belongs(notification.request_id.as_deref()) {
                    tracing::debug!("ignoring notification for a different tool call");
                    return false;
                }
                self.notifications.push(notification);
            }
            ToolCallEvent::Cancelled => self.cancelled = true,
        }
        true
    }

    /// The current snapshot, once the request has been seen
    pub fn input(&self) -> Option<ToolCallInput<'_>> {
        self.request.as_ref().map(|tool_request| ToolCallInput {
            is_cancelled_message: self.cancelled,
            tool_request,
            tool_response: self.response.as_ref(),
            notifications: &self.notifications,
        })
    }
}
