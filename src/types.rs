use std::fmt;

/// Terminal status of a run. Ordinals are stable and form the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    SnapshotCreationFailed = 1,
    ListingUnavailable = 2,
    NoMatchingSnapshot = 3,
    MountDirectoryFailed = 4,
    MountFailed = 5,
    BackupToolFailed = 6,
    UnmountFailed = 7,
    LoggingSetupFailed = 8,
    CredentialInvalid = 9,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExitCode::Success => "success",
            ExitCode::SnapshotCreationFailed => "snapshot creation failed",
            ExitCode::ListingUnavailable => "snapshot listing unavailable",
            ExitCode::NoMatchingSnapshot => "no matching snapshot",
            ExitCode::MountDirectoryFailed => "mount directory failed",
            ExitCode::MountFailed => "mount failed",
            ExitCode::BackupToolFailed => "backup tool failed",
            ExitCode::UnmountFailed => "unmount failed",
            ExitCode::LoggingSetupFailed => "logging setup failed",
            ExitCode::CredentialInvalid => "credential invalid",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    pub dry_run: bool,
    pub verbose: bool,
}
