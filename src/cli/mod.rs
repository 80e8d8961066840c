//! Command-line interface: argument parsing, command dispatch and reporting.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, SyncArgs, SyncCommand};
pub use commands::{CommandResult, CommandSummary, InitSummary};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let result = run::run(args.command_or_default())?;
    report::print(&result);

    Ok(result.exit_status())
}
