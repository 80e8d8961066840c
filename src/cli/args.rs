//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync` (default): extract keys, reconcile the reference catalog and
//!   translate every target locale
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::providers::ProviderKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// The command to run. Without a subcommand the tool performs a sync
    /// with the configured defaults.
    pub fn command_or_default(self) -> Command {
        self.command.unwrap_or_else(|| {
            Command::Sync(SyncCommand {
                args: SyncArgs::default(),
            })
        })
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Project root where the config file search starts
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locales directory (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Target locale to sync; repeat to sync several (replaces the configured list)
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Translation provider (overrides config file)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// API key for the translation provider
    #[arg(long, env = "LOCSYNC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync catalogs with the source code and translate missing messages (default)
    Sync(SyncCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
