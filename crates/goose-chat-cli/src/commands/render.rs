use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use goose_chat::preferences::FilePreferenceStore;
use goose_chat::settings::Settings;

use super::style::StyleArg;
use crate::terminal;
use crate::transcript::{parse_events, Replay};

pub fn handle_render(
    config: Option<&Path>,
    file: &Path,
    style_arg: Option<StyleArg>,
    each: bool,
    plain: bool,
) -> Result<()> {
    let settings = Settings::new(config)?;
    let response_style = match style_arg {
        Some(arg) => arg.into(),
        None => settings.response_style(&FilePreferenceStore::open_default()?),
    };

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read transcript {}", file.display()))?;
    let events = parse_events(&text)?;
    tracing::debug!(events = events.len(), %response_style, "replaying transcript");

    let mut replay = Replay::new(response_style);
    let total = events.len();
    for (index, event) in events.into_iter().enumerate() {
        replay.apply(event);
        if each && index + 1 < total {
            println!("{}", style(format!("── after event {} ──", index + 1)).dim());
            print_all(&replay, plain)?;
        }
    }

    if each && total > 0 {
        println!("{}", style(format!("── after event {} ──", total)).dim());
    }
    print_all(&replay, plain)
}

fn print_all(replay: &Replay, plain: bool) -> Result<()> {
    for layout in replay.layouts() {
        terminal::print(&layout, plain)?;
        println!();
    }
    Ok(())
}
