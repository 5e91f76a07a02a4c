use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes reported by a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    Success = 0,
    ParsingError = 1,
    GenericError = 3,
    /// The virtualization driver service is missing or stopped.
    FilterError = 4,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitCode::Success => "Success",
            ExitCode::ParsingError => "ParsingError",
            ExitCode::GenericError => "GenericError",
            ExitCode::FilterError => "FilterError",
        };
        write!(f, "{} ({})", name, self.as_i32())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerbError {
    #[error("Unable to read the local git config: {detail}")]
    ConfigReadFailure { detail: String },

    #[error("Unable to configure git repo: failed to set '{key}': {detail}")]
    ConfigWriteFailure { key: String, detail: String },

    #[error("Error: Could not find git installation. Install git and try again.")]
    GitNotInstalled,

    #[error("Error: Could not find {name}. Reinstall GVFS and try again.")]
    HooksNotFound { name: String },

    #[error("Error: '{}' is not a valid GVFS enlistment: {detail}", .root.display())]
    InvalidEnlistment { root: PathBuf, detail: String },

    #[error("Error: Unable to retrieve the git version: {detail}")]
    GitVersionUnavailable { detail: String },

    #[error("Error: Unable to parse the git version '{text}'")]
    GitVersionUnparsable { text: String },

    #[error("Error: Invalid version of git {installed}. Must use a git build for the '{platform}' platform.")]
    WrongGitPlatform { installed: String, platform: String },

    #[error("Error: Installed git version {installed} is less than the supported version of {minimum}.")]
    GitTooOld { installed: String, minimum: String },

    #[error("Error: The '{name}' service was not found. Reinstall GVFS and try again.")]
    ServiceNotFound { name: String },

    #[error("Error: The '{name}' service is not running. Start the service and try again.")]
    ServiceNotRunning { name: String },

    #[error("Error: Unable to query the '{name}' service: {detail}")]
    ServiceQueryFailed { name: String, detail: String },

    #[error("WARNING: Unable to validate your GVFS version. {detail}")]
    RemotePolicyUnavailable { detail: String },

    #[error("ERROR: Your GVFS version {current} is no longer supported. Install the latest and try again.")]
    RemotePolicyRejected { current: String },

    #[error("Unable to determine if this repo is excluded from antivirus: {detail}")]
    ExclusionQueryFailure { detail: String },

    #[error("Need elevated privileges to add an antivirus exclusion for '{}'. Rerun as administrator or add the exclusion manually.", .path.display())]
    ExclusionElevationRequired { path: PathBuf },

    #[error("'{}' is still not excluded from antivirus after adding it: {detail}", .path.display())]
    ExclusionNotApplied { path: PathBuf, detail: String },

    #[error("{message}")]
    VerbFailed { message: String },
}

impl VerbError {
    pub fn config_read_failure(detail: impl Into<String>) -> Self {
        Self::ConfigReadFailure {
            detail: detail.into(),
        }
    }

    pub fn config_write_failure(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ConfigWriteFailure {
            key: key.into(),
            detail: detail.into(),
        }
    }

    pub fn hooks_not_found(name: impl Into<String>) -> Self {
        Self::HooksNotFound { name: name.into() }
    }

    pub fn invalid_enlistment(root: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::InvalidEnlistment {
            root: root.into(),
            detail: detail.into(),
        }
    }

    pub fn remote_policy_unavailable(detail: impl Into<String>) -> Self {
        Self::RemotePolicyUnavailable {
            detail: detail.into(),
        }
    }

    pub fn verb_failed(message: impl Into<String>) -> Self {
        Self::VerbFailed {
            message: message.into(),
        }
    }

    /// Advisory kinds emit text but never change the exit code.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::RemotePolicyUnavailable { .. }
                | Self::ExclusionQueryFailure { .. }
                | Self::ExclusionElevationRequired { .. }
                | Self::ExclusionNotApplied { .. }
        )
    }

    /// Exit code used when this kind aborts a verb.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ServiceNotFound { .. }
            | Self::ServiceNotRunning { .. }
            | Self::ServiceQueryFailed { .. } => ExitCode::FilterError,
            _ => ExitCode::GenericError,
        }
    }
}

/// Unwinds a verb back to its execution frame.
///
/// Produced only by [`crate::common::reporter::ErrorReporter::abort`],
/// which has already written the message to the verb's output sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{verb} aborted with {exit_code}: {error}")]
pub struct Abort {
    verb: String,
    exit_code: ExitCode,
    error: VerbError,
}

impl Abort {
    pub(crate) fn new(verb: impl Into<String>, exit_code: ExitCode, error: VerbError) -> Self {
        let exit_code = if exit_code.is_success() {
            ExitCode::GenericError
        } else {
            exit_code
        };
        Self {
            verb: verb.into(),
            exit_code,
            error,
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error(&self) -> &VerbError {
        &self.error
    }
}
