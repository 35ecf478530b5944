use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use goose_chat::schema_content::{parse_schema_response, SchemaResponse};

use crate::terminal;

pub fn handle_schema(file: &Path, plain: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let response = parse_schema_response(&text).context("Not valid schema content")?;

    match response {
        SchemaResponse::Content(content) => terminal::print(&content.layout(), plain),
        SchemaResponse::Status(status) => {
            let waiting = if status.waiting_for_user {
                ", waiting for user"
            } else {
                ""
            };
            println!("{}", style(format!("({}{})", status.status, waiting)).dim());
            Ok(())
        }
    }
}
