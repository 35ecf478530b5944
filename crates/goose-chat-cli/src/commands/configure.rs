use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use console::style;
use goose_chat::provider_config::{submit_provider_config, GoosedConfigClient, ProviderDetails};
use goose_chat::settings::Settings;

fn parse_values(values: &[String]) -> Result<HashMap<String, String>> {
    values
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", pair))
        })
        .collect()
}

pub async fn handle_configure(
    config: Option<&Path>,
    provider_file: &Path,
    values: &[String],
) -> Result<()> {
    let settings = Settings::new(config)?;
    let provider: ProviderDetails = serde_json::from_str(
        &fs::read_to_string(provider_file)
            .with_context(|| format!("Failed to read {}", provider_file.display()))?,
    )
    .context("Provider file is not a valid provider description")?;
    let values = parse_values(values)?;

    let client = GoosedConfigClient::from_settings(&settings.server);
    submit_provider_config(&client, &client, &provider, &values).await?;

    println!("Saved configuration for {}", style(&provider.name).green());
    Ok(())
}
