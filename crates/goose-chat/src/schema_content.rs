//! Structured content attached to a finished assistant message: plans to approve
//! or choose from, option lists, input forms and rich presentations.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::layout::Node;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub step: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOption {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Single,
    Multiple,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Dropdown,
    Date,
    Number,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    Markdown,
    Link,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchemaContent {
    #[serde(rename_all = "camelCase")]
    PlanApproval {
        plan: Plan,
        confirmation_required: bool,
    },
    PlanSelection {
        plans: Vec<Plan>,
    },
    #[serde(rename_all = "camelCase")]
    ActionOptions {
        options: Vec<ActionOption>,
        selection_type: SelectionType,
    },
    InputForm {
        fields: Vec<FormField>,
    },
    Presentation {
        content: Vec<ContentItem>,
    },
}

/// Reply meaning the assistant has nothing structured to add
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStatus {
    pub status: String,
    #[serde(default)]
    pub waiting_for_user: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaResponse {
    Content(SchemaContent),
    Status(ConversationStatus),
}

impl SchemaResponse {
    pub fn content(&self) -> Option<&SchemaContent> {
        match self {
            SchemaResponse::Content(content) => Some(content),
            SchemaResponse::Status(_) => None,
        }
    }
}

lazy_static! {
    static ref CODE_BLOCK: Regex =
        Regex::new(r"^```(?:json)?\n([\s\S]*?)```$").expect("code block pattern is valid");
}

/// Drop a surrounding ```` ``` ```` / ```` ```json ```` fence, if there is one
pub fn strip_markdown_code_blocks(text: &str) -> &str {
    let trimmed = text.trim();
    match CODE_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

pub fn parse_schema_response(text: &str) -> Result<SchemaResponse, serde_json::Error> {
    serde_json::from_str(strip_markdown_code_blocks(text))
}

fn plan_card(plan: &Plan) -> Node {
    let mut children = vec![Node::Heading(plan.name.clone())];
    children.extend(
        plan.steps
            .iter()
            .map(|s| Node::Text(format!("{}. {}", s.step, s.description))),
    );
    Node::Card(children)
}

fn item_node(item: &ContentItem) -> Node {
    match item.item_type {
        ItemType::Markdown => Node::Markdown(item.value.clone()),
        ItemType::Image => Node::Image {
            uri: item.value.clone(),
            description: item.description.clone(),
        },
        ItemType::Link => Node::Link {
            href: item.value.clone(),
            label: item
                .description
                .clone()
                .unwrap_or_else(|| item.value.clone()),
        },
        ItemType::Text => Node::Text(item.value.clone()),
    }
}

impl SchemaContent {
    pub fn layout(&self) -> Node {
        match self {
            SchemaContent::PlanApproval {
                plan,
                confirmation_required,
            } => {
                let mut children = vec![plan_card(plan)];
                if *confirmation_required {
                    children.push(Node::Note(
                        "Please review and confirm this plan.".to_string(),
                    ));
                }
                Node::Group(children)
            }
            SchemaContent::PlanSelection { plans } => {
                let mut children = vec![Node::Heading("Please select a plan:".to_string())];
                children.extend(plans.iter().map(plan_card));
                Node::Group(children)
            }
            SchemaContent::ActionOptions {
                options,
                selection_type,
            } => {
                let prompt = match selection_type {
                    SelectionType::Single => "Select one option:",
                    SelectionType::Multiple => "Select one or more options:",
                    SelectionType::Reject => "Available options:",
                };
                let mut children = vec![Node::Heading(prompt.to_string())];
                children.extend(options.iter().map(|o| {
                    Node::Card(vec![
                        Node::Heading(o.name.clone()),
                        Node::Note(o.description.clone()),
                    ])
                }));
                Node::Group(children)
            }
            SchemaContent::InputForm { fields } => Node::Card(
                fields
                    .iter()
                    .map(|f| Node::Field {
                        label: f.label.clone(),
                        kind: f.field_type.to_string(),
                        required: f.required,
                        options: f.options.clone().unwrap_or_default(),
                    })
                    .collect(),
            ),
            SchemaContent::Presentation { content } => {
                Node::Group(content.iter().map(item_node).collect())
            }
        }
    }
}
