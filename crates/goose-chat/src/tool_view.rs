//! Turns the events of a single tool call into one view state.
//!
//! A tool call is shown from its request, its response once it arrives, and the
//! notifications the system sends while it runs. Every update re-derives the
//! whole view from those inputs; the only state carried between updates is
//! which sections are expanded.
pub mod expansion;
pub mod feed;
pub mod format;
pub mod notifications;
pub mod progress;
pub mod render;
pub mod results;

use std::collections::HashMap;

use self::expansion::{ExpansionEvent, ExpansionState};
use self::progress::Progress;
use self::results::VisibleResult;
use crate::layout::{Node, Section};
use crate::models::message::{Message, ToolRequest, ToolResponse};
use crate::models::notification::NotificationEvent;
use crate::models::tool::ToolCall;
use crate::preferences::ResponseStyle;

/// The status dot next to a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStatus {
    Loading,
    Success,
    Error,
}

impl LoadingStatus {
    pub fn of(response: Option<&ToolResponse>) -> Self {
        match response.map(|r| &r.tool_result) {
            None => LoadingStatus::Loading,
            Some(Ok(_)) => LoadingStatus::Success,
            Some(Err(_)) => LoadingStatus::Error,
        }
    }
}

/// Everything known about one tool call at a point in time
#[derive(Debug, Clone, Copy)]
pub struct ToolCallInput<'a> {
    pub is_cancelled_message: bool,
    pub tool_request: &'a ToolRequest,
    pub tool_response: Option<&'a ToolResponse>,
    pub notifications: &'a [NotificationEvent],
}

/// The derived view state of a tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallModel {
    pub id: String,
    pub tool_call: ToolCall,
    pub display_name: String,
    pub compact_arguments: Option<String>,
    pub loading_status: LoadingStatus,
    pub is_cancelled: bool,
    pub is_expand_tool_details: bool,
    pub results: Vec<VisibleResult>,
    pub logs: Vec<String>,
    /// Most advanced entry per progress token
    pub progress: Vec<Progress>,
    pub should_expand: bool,
}

impl ToolCallModel {
    /// Derive the view state, or `None` when the request itself failed
    pub fn evaluate(input: &ToolCallInput<'_>, style: ResponseStyle) -> Option<Self> {
        let tool_call = input.tool_request.tool_call.as_ref().ok()?;

        let is_expand_tool_details = style.expands_tool_details();
        let results = results::filter_results(input.tool_response);
        let classified = notifications::classify(input.notifications);
        let should_expand =
            is_expand_tool_details || results.iter().any(|r| r.is_expand_tool_results);

        Some(Self {
            id: input.tool_request.id.clone(),
            display_name: format::display_tool_name(&tool_call.name),
            compact_arguments: format::compact_arguments(&tool_call.arguments),
            tool_call: tool_call.clone(),
            loading_status: LoadingStatus::of(input.tool_response),
            is_cancelled: input.is_cancelled_message,
            is_expand_tool_details,
            results,
            logs: classified.logs,
            progress: progress::aggregate(&classified.progress),
            should_expand,
        })
    }

    /// Progress bars only stand in while there are no results to show
    pub fn visible_progress(&self) -> &[Progress] {
        if self.results.is_empty() {
            &self.progress
        } else {
            &[]
        }
    }
}

/// One tool call on screen: the latest view state plus the expansion of each section
#[derive(Debug, Clone)]
pub struct ToolCallWidget {
    style: ResponseStyle,
    model: Option<ToolCallModel>,
    main: Option<ExpansionState>,
    details: Option<ExpansionState>,
    results: Vec<ExpansionState>,
    logs: Option<ExpansionState>,
}

impl ToolCallWidget {
    pub fn new(style: ResponseStyle) -> Self {
        Self {
            style,
            model: None,
            main: None,
            details: None,
            results: Vec::new(),
            logs: None,
        }
    }

    pub fn model(&self) -> Option<&ToolCallModel> {
        self.model.as_ref()
    }

    /// Re-derive the view from the latest inputs. Sections get their starting
    /// expansion the first time they appear.
    pub fn update(&mut self, input: &ToolCallInput<'_>) -> Option<&ToolCallModel> {
        let Some(model) = ToolCallModel::evaluate(input, self.style) else {
            self.model = None;
            return None;
        };

        self.main
            .get_or_insert_with(|| ExpansionState::new(model.should_expand))
            .apply(ExpansionEvent::Force(model.should_expand));

        if !model.tool_call.arguments.is_empty() && self.details.is_none() {
            self.details = Some(ExpansionState::new(model.is_expand_tool_details));
        }

        for visible in model.results.iter().skip(self.results.len()) {
            self.results
                .push(ExpansionState::new(visible.is_expand_tool_results));
        }

        if !model.logs.is_empty() && self.logs.is_none() {
            self.logs = Some(ExpansionState::new(model.results.is_empty()));
        }

        self.model = Some(model);
        self.model.as_ref()
    }

    fn state(&self, section: Section) -> Option<&ExpansionState> {
        match section {
            Section::ToolCall => self.main.as_ref(),
            Section::Details => self.details.as_ref(),
            Section::Result(index) => self.results.get(index),
            Section::Logs => self.logs.as_ref(),
        }
    }

    /// Flip a section the user clicked. Sections not on screen are ignored.
    pub fn toggle(&mut self, section: Section) {
        let state = match section {
            Section::ToolCall => self.main.as_mut(),
            Section::Details => self.details.as_mut(),
            Section::Result(index) => self.results.get_mut(index),
            Section::Logs => self.logs.as_mut(),
        };
        if let Some(state) = state {
            state.apply(ExpansionEvent::Toggle);
        }
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.state(section).is_some_and(|s| s.is_expanded())
    }

    pub fn layout(&self) -> Option<Node> {
        self.model
            .as_ref()
            .map(|model| render::layout(model, |section| self.is_expanded(section)))
    }
}

/// Pair every tool request in a conversation with its response and notifications.
///
/// Responses are matched by id across the whole conversation since they usually
/// arrive in a later message than the request.
pub fn pair_tool_calls<'a>(
    messages: &'a [Message],
    notifications: &'a HashMap<String, Vec<NotificationEvent>>,
    is_cancelled_message: bool,
) -> Vec<ToolCallInput<'a>> {
    let responses: HashMap<&str, &ToolResponse> = messages
        .iter()
        .flat_map(|m| m.tool_responses())
        .map(|r| (r.id.as_str(), r))
        .collect();

    messages
        .iter()
        .flat_map(|m| m.tool_requests())
        .map(|request| ToolCallInput {
            is_cancelled_message,
            tool_request: request,
            tool_response: responses.get(request.id.as_str()).copied(),
            notifications: notifications
                .get(&request.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        })
        .collect()
}

/// Group notifications by the request they belong to; ones without a request id are dropped
pub fn notifications_by_request(
    notifications: &[NotificationEvent],
) -> HashMap<String, Vec<NotificationEvent>> {
    let mut grouped: HashMap<String, Vec<NotificationEvent>> = HashMap::new();
    for notification in notifications {
        if let Some(id) = &notification.request_id {
            grouped
                .entry(id.clone())
                .or_default()
                .push(notification.clone());
        }
    }
    grouped
}
