//! A small, toolkit independent description of what the chat view shows.
//!
//! Tool calls and schema content are both turned into a tree of [`Node`]s, and
//! front ends (the terminal printer in `goose-chat-cli`, tests) walk the tree.
use crate::tool_view::format::ArgumentLine;
use crate::tool_view::LoadingStatus;

/// Identifies an expandable section inside one tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    ToolCall,
    Details,
    Result(usize),
    Logs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    ToolCall {
        status: LoadingStatus,
        name: String,
        arguments: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A header that can be toggled; `children` is empty while collapsed
    Section {
        section: Section,
        label: Label,
        expanded: bool,
        children: Vec<Node>,
    },
    Arguments(Vec<ArgumentLine>),
    Markdown(String),
    Image {
        uri: String,
        description: Option<String>,
    },
    Log(String),
    /// `percent` is `None` for an indeterminate bar
    ProgressBar {
        progress: f64,
        total: Option<f64>,
        percent: Option<f64>,
        message: Option<String>,
    },
    Heading(String),
    Text(String),
    Note(String),
    Link {
        href: String,
        label: String,
    },
    Field {
        label: String,
        kind: String,
        required: bool,
        options: Vec<String>,
    },
    /// A bordered group, e.g. one plan or one option
    Card(Vec<Node>),
    Group(Vec<Node>),
}

impl Node {
    /// Depth first search for the first section with the given id
    pub fn find_section(&self, wanted: Section) -> Option<&Node> {
        match self {
            Node::Section {
                section, children, ..
            } => {
                if *section == wanted {
                    Some(self)
                } else {
                    children.iter().find_map(|c| c.find_section(wanted))
                }
            }
            Node::Card(children) | Node::Group(children) => {
                children.iter().find_map(|c| c.find_section(wanted))
            }
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section { children, .. } | Node::Card(children) | Node::Group(children) => {
                children
            }
            _ => &[],
        }
    }

    /// Every node in the tree, parents before children
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }
}
