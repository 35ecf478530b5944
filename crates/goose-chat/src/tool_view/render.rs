use super::format::argument_lines;
use super::results::VisibleResult;
use super::ToolCallModel;
use crate::layout::{Label, Node, Section};
use crate::models::content::Content;

/// Lay out one tool call. `expanded` answers whether a section is open; the
/// body of a closed section is left out.
pub fn layout(model: &ToolCallModel, expanded: impl Fn(Section) -> bool) -> Node {
    let mut children = Vec::new();

    if !model.tool_call.arguments.is_empty() {
        children.push(section(
            Section::Details,
            Label::Text("Tool Details".to_string()),
            &expanded,
            || vec![Node::Arguments(argument_lines(&model.tool_call.arguments))],
        ));
    }

    if !model.is_cancelled {
        for (index, visible) in model.results.iter().enumerate() {
            children.push(section(
                Section::Result(index),
                Label::Text("Output".to_string()),
                &expanded,
                || result_body(visible),
            ));
        }

        if !model.logs.is_empty() {
            children.push(section(
                Section::Logs,
                Label::Text("Logs".to_string()),
                &expanded,
                || model.logs.iter().cloned().map(Node::Log).collect(),
            ));
        }

        children.extend(model.visible_progress().iter().map(|entry| Node::ProgressBar {
            progress: entry.progress,
            total: entry.total,
            percent: entry.percent(),
            message: entry.message.clone(),
        }));
    }

    let is_open = expanded(Section::ToolCall);
    Node::Section {
        section: Section::ToolCall,
        label: Label::ToolCall {
            status: model.loading_status,
            name: model.display_name.clone(),
            arguments: model.compact_arguments.clone(),
        },
        expanded: is_open,
        children: if is_open { children } else { Vec::new() },
    }
}

fn section(
    id: Section,
    label: Label,
    expanded: &impl Fn(Section) -> bool,
    body: impl FnOnce() -> Vec<Node>,
) -> Node {
    let is_open = expanded(id);
    Node::Section {
        section: id,
        label,
        expanded: is_open,
        children: if is_open { body() } else { Vec::new() },
    }
}

fn result_body(visible: &VisibleResult) -> Vec<Node> {
    match &visible.result {
        Content::Text(text) if !text.text.is_empty() => vec![Node::Markdown(text.text.clone())],
        Content::Text(_) => Vec::new(),
        Content::Image(image) => vec![Node::Image {
            uri: image.data_uri(),
            description: Some("Tool result".to_string()),
        }],
    }
}
