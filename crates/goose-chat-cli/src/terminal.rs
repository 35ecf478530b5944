use anyhow::Result;
use bat::WrappingMode;
use console::style;
use goose_chat::layout::{Label, Node};
use goose_chat::tool_view::format::{ArgumentLine, ArgumentValue};
use goose_chat::tool_view::LoadingStatus;

const INDENT: &str = "    ";
const BAR_WIDTH: usize = 20;
const MAX_URI_LENGTH: usize = 60;
const THEME: &str = "zenburn";

/// A printed row. Markdown is kept apart so it can go through bat.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Plain(String),
    Markdown { indent: String, text: String },
}

pub fn lines(node: &Node) -> Vec<Line> {
    let mut out = Vec::new();
    push_node(node, 0, &mut out);
    out
}

fn plain(out: &mut Vec<Line>, depth: usize, text: impl std::fmt::Display) {
    out.push(Line::Plain(format!("{}{}", INDENT.repeat(depth), text)));
}

fn push_node(node: &Node, depth: usize, out: &mut Vec<Line>) {
    match node {
        Node::Section {
            label,
            expanded,
            children,
            ..
        } => {
            let marker = if *expanded { "▾" } else { "▸" };
            plain(out, depth, format!("{} {}", style(marker).dim(), label_text(label)));
            for child in children {
                push_node(child, depth + 1, out);
            }
        }
        Node::Arguments(arguments) => {
            for line in arguments {
                plain(out, depth + line.depth, argument_text(line));
            }
        }
        Node::Markdown(text) => out.push(Line::Markdown {
            indent: INDENT.repeat(depth),
            text: text.clone(),
        }),
        Node::Image { uri, description } => {
            let shown = if uri.chars().count() > MAX_URI_LENGTH {
                format!("{}...", uri.chars().take(MAX_URI_LENGTH).collect::<String>())
            } else {
                uri.clone()
            };
            let label = description.as_deref().unwrap_or("image");
            plain(out, depth, format!("[{}] {}", style(label).cyan(), style(shown).dim()));
        }
        Node::Log(line) => plain(out, depth, style(line).dim()),
        Node::ProgressBar { percent, message, .. } => {
            if let Some(message) = message {
                plain(out, depth, message);
            }
            plain(out, depth, progress_bar(*percent));
        }
        Node::Heading(text) => plain(out, depth, style(text).bold()),
        Node::Text(text) => plain(out, depth, text),
        Node::Note(text) => plain(out, depth, style(text).dim()),
        Node::Link { href, label } => {
            plain(out, depth, format!("{} ({})", style(label).underlined(), href))
        }
        Node::Field {
            label,
            kind,
            required,
            options,
        } => {
            let required = if *required {
                style("*").red().to_string()
            } else {
                String::new()
            };
            let mut text = format!("{}{}: <{}>", label, required, kind);
            if !options.is_empty() {
                text.push_str(&format!(" [{}]", options.join(" | ")));
            }
            plain(out, depth, text);
        }
        Node::Card(children) => {
            for child in children {
                push_node(child, depth + 1, out);
            }
            out.push(Line::Plain(String::new()));
        }
        Node::Group(children) => {
            for child in children {
                push_node(child, depth, out);
            }
        }
    }
}

fn label_text(label: &Label) -> String {
    match label {
        Label::Text(text) => text.clone(),
        Label::ToolCall {
            status,
            name,
            arguments,
        } => {
            let dot = match status {
                LoadingStatus::Loading => style("○").yellow(),
                LoadingStatus::Success => style("●").green(),
                LoadingStatus::Error => style("●").red(),
            };
            match arguments {
                Some(arguments) => format!("{} {}  {}", dot, name, style(arguments).dim()),
                None => format!("{} {}", dot, name),
            }
        }
    }
}

fn argument_text(line: &ArgumentLine) -> String {
    let key = line.key.as_deref().unwrap_or_default();
    match &line.value {
        None => format!("{}:", style(key).dim()),
        Some(ArgumentValue::Text(s)) => format!("{}: {}", style(key).dim(), style(s).green()),
        Some(ArgumentValue::Number(n)) => format!("{}: {}", style(key).dim(), style(n).blue()),
        Some(ArgumentValue::Bool(b)) => format!("{}: {}", style(key).dim(), style(b).blue()),
        Some(ArgumentValue::Null) => format!("{}: {}", style(key).dim(), style("null").dim()),
    }
}

fn progress_bar(percent: Option<f64>) -> String {
    match percent {
        Some(percent) => {
            let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "[{}{}] {:.0}%",
                style("█".repeat(filled)).blue(),
                "░".repeat(BAR_WIDTH - filled),
                percent
            )
        }
        None => format!("[{}] working", style("~".repeat(BAR_WIDTH)).blue()),
    }
}

fn print_markdown(content: &str) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(THEME)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow::anyhow!("failed to print markdown: {}", e))?;
    Ok(())
}

/// Print a layout to stdout; `plain` skips syntax highlighting of markdown
pub fn print(node: &Node, plain: bool) -> Result<()> {
    for line in lines(node) {
        match line {
            Line::Plain(text) => println!("{}", text),
            Line::Markdown { indent, text } if plain => {
                for row in text.lines() {
                    println!("{}{}", indent, row);
                }
            }
            Line::Markdown { text, .. } => print_markdown(&text)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goose_chat::layout::Section;

    fn plain_text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| match l {
                Line::Plain(s) => s.clone(),
                Line::Markdown { indent, text } => format!("{}md:{}", indent, text),
            })
            .collect()
    }

    #[test]
    fn test_tool_call_lines() {
        console::set_colors_enabled(false);
        let node = Node::Section {
            section: Section::ToolCall,
            label: Label::ToolCall {
                status: LoadingStatus::Success,
                name: "Shell".into(),
                arguments: Some("command: ls".into()),
            },
            expanded: true,
            children: vec![
                Node::Section {
                    section: Section::Result(0),
                    label: Label::Text("Output".into()),
                    expanded: true,
                    children: vec![Node::Markdown("done".into())],
                },
                Node::Section {
                    section: Section::Logs,
                    label: Label::Text("Logs".into()),
                    expanded: false,
                    children: vec![],
                },
            ],
        };

        assert_eq!(
            plain_text(&lines(&node)),
            vec![
                "▾ ● Shell  command: ls",
                "    ▾ Output",
                "        md:done",
                "    ▸ Logs",
            ]
        );
    }

    #[test]
    fn test_progress_bar() {
        console::set_colors_enabled(false);
        assert_eq!(
            progress_bar(Some(70.0)),
            format!("[{}{}] 70%", "█".repeat(14), "░".repeat(6))
        );
        assert_eq!(progress_bar(None), format!("[{}] working", "~".repeat(20)));
    }

    #[test]
    fn test_long_image_uri_is_cut() {
        console::set_colors_enabled(false);
        let node = Node::Image {
            uri: format!("data:image/png;base64,{}", "A".repeat(200)),
            description: None,
        };
        let text = plain_text(&lines(&node)).remove(0);
        assert!(text.starts_with("[image] data:image/png;base64,"));
        assert!(text.ends_with("..."));
    }
}
