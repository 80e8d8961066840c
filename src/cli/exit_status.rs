use std::process::ExitCode;

/// How a locsync invocation ended, as seen by scripts and CI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// All catalogs were written and every provider call succeeded.
    Success,
    /// Catalogs were written, but at least one key fell back to the
    /// reference text because the provider failed. Also used when `init`
    /// finds an existing config file.
    Failure,
    /// Nothing past the failing step was written: bad config, a missing or
    /// malformed catalog, an unscannable source file, or an I/O error.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
