use anyhow::Result;

use super::{
    args::Command,
    commands::{CommandResult, init::init, sync::sync},
};

/// Dispatch to the handler for `command`.
///
/// # Returns
/// - `Ok(CommandResult)` describing what the command did
/// - `Err` if the command aborted (config error, missing reference catalog, I/O error)
pub fn run(command: Command) -> Result<CommandResult> {
    match command {
        Command::Sync(cmd) => sync(cmd),
        Command::Init => init(),
    }
}
