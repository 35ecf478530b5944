use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use goose_chat::search_path::SearchPaths;
use goose_chat::settings::Settings;
use goose_chat::sidecar::{expand_tilde, find_goosed, AppLayout};

/// `--resources` may still hold a `~` when it was quoted or passed as `--resources=~/...`
fn app_layout(resources: Option<&str>, exe: PathBuf, cwd: PathBuf) -> AppLayout {
    match resources {
        Some(resources) => {
            let resources = expand_tilde(resources);
            let app = resources
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| resources.clone());
            AppLayout::Packaged {
                resources,
                app,
                exe,
            }
        }
        None => AppLayout::Development { cwd },
    }
}

pub fn handle_locate(config: Option<&Path>, resources: Option<String>, path: bool) -> Result<()> {
    let exe = env::current_exe().context("Could not determine the current executable")?;
    let cwd = env::current_dir().context("Could not determine the working directory")?;
    let layout = app_layout(resources.as_deref(), exe, cwd);

    let goosed = find_goosed(&layout)?;
    println!("{}", goosed.display());

    if path {
        let settings = Settings::new(config)?;
        let joined = SearchPaths::builder(&settings.search_paths)
            .with_npm()
            .env_var()?;
        println!("{}", joined.to_string_lossy());
    }
    Ok(())
}
