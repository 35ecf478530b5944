use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;
mod transcript;

use commands::configure::handle_configure;
use commands::locate::handle_locate;
use commands::render::handle_render;
use commands::schema::handle_schema;
use commands::style::{handle_style, StyleArg};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file layered under GOOSE_* environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print plain text instead of highlighted markdown
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a tool call transcript and show the resulting view
    Render {
        /// Transcript file: one event per line, or a JSON array of events
        file: PathBuf,

        /// Override the stored response style
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Print the view after every event instead of only at the end
        #[arg(long)]
        each: bool,
    },
    /// Show or change the response style preference
    Style {
        #[arg(value_enum)]
        value: Option<StyleArg>,
    },
    /// Show schema content returned for a message
    Schema { file: PathBuf },
    /// Find the goosed executable
    Locate {
        /// Look in an installed bundle rooted here instead of the working directory
        #[arg(long)]
        resources: Option<String>,

        /// Also print the PATH handed to tools
        #[arg(long)]
        path: bool,
    },
    /// Save provider configuration through goosed
    Configure {
        /// Provider description with its config_keys
        provider: PathBuf,

        /// Values entered for the provider, as KEY=VALUE
        values: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Render { file, style, each } => {
            handle_render(config, &file, style, each, cli.plain)
        }
        Command::Style { value } => handle_style(value),
        Command::Schema { file } => handle_schema(&file, cli.plain),
        Command::Locate { resources, path } => handle_locate(config, resources, path),
        Command::Configure { provider, values } => {
            handle_configure(config, &provider, &values).await
        }
    }
}
