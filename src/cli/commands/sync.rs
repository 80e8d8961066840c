use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use super::super::{
    args::{SyncArgs, SyncCommand},
    report::print_progress,
};
use super::{CommandResult, CommandSummary};
use crate::{
    config::{SyncConfig, load_config},
    core::run_sync,
    providers::build_translator,
};

/// Run the whole pipeline once with config-file settings and command-line
/// overrides applied.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let root = project_root(args)?;

    let loaded = load_config(&root)?;
    let mut config = loaded.config;
    if loaded.from_file {
        debug!("Using config from {}", loaded.base_dir.display());
    }

    if let Some(locale) = &args.reference_locale {
        config.reference_locale = locale.clone();
    }
    if !args.locales.is_empty() {
        config.target_locales = args.locales.clone();
    }
    if let Some(provider) = args.provider {
        config.provider.name = provider;
    }
    if let Some(key) = &args.api_key {
        config.provider.api_key = Some(key.clone());
    }
    config
        .validate()
        .context("Invalid settings after applying command-line overrides")?;

    let mut sync_config = SyncConfig::resolve(&config, &loaded.base_dir);
    if let Some(source_root) = &args.source_root {
        sync_config.source_root = root.join(source_root);
    }
    if let Some(locales_dir) = &args.locales_dir {
        sync_config.locales_dir = root.join(locales_dir);
    }

    let translator = build_translator(&config.provider)?;
    debug!("Translating with {}", translator.name());

    let report = run_sync(&sync_config, translator.as_ref(), &mut print_progress)?;

    Ok(CommandResult {
        summary: CommandSummary::Sync(report),
    })
}

fn project_root(args: &SyncArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(match &args.path {
        Some(path) => cwd.join(path),
        None => cwd,
    })
}
