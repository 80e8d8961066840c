use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::SyncReport;

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncReport),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// False when a config file was already present and left untouched.
    pub created: bool,
}

/// Result of running a locsync command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Sync(report) if report.provider_failure_count() > 0 => ExitStatus::Failure,
            CommandSummary::Sync(_) => ExitStatus::Success,
            CommandSummary::Init(summary) if summary.created => ExitStatus::Success,
            CommandSummary::Init(_) => ExitStatus::Failure,
        }
    }
}
