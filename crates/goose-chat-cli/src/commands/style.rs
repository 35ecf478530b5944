use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use goose_chat::preferences::{
    response_style, set_response_style, FilePreferenceStore, ResponseStyle,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StyleArg {
    Concise,
    Detailed,
}

impl From<StyleArg> for ResponseStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Concise => ResponseStyle::Concise,
            StyleArg::Detailed => ResponseStyle::Detailed,
        }
    }
}

pub fn handle_style(value: Option<StyleArg>) -> Result<()> {
    let mut store = FilePreferenceStore::open_default()?;

    match value {
        None => println!("{}", response_style(&store)),
        Some(value) => {
            set_response_style(&mut store, value.into()).with_context(|| {
                format!("Failed to save preference to {}", store.path().display())
            })?;
            println!(
                "Response style set to {}",
                style(ResponseStyle::from(value)).green()
            );
        }
    }
    Ok(())
}
