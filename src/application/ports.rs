//! Collaborator contracts consumed by the preflight gates.
//!
//! Every external system a verb touches (the git binary, the server's
//! `gvfs/config` endpoint, the service manager, the antivirus product) sits
//! behind one of these traits so the gates can be exercised with fakes.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::enlistment::Enlistment;
use crate::domain::entities::remote_version_policy::RemoteVersionPolicy;
use crate::domain::value_objects::git_config_setting::GitConfigSetting;

pub use crate::common::reporter::OutputSink;

/// Local git config keyed by normalized key name.
pub type GitConfigMap = BTreeMap<String, GitConfigSetting>;

/// Errors reported by collaborator implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("failed to run '{command}': {message}")]
    LaunchFailed { command: String, message: String },

    #[error("'{command}' exited with code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("not supported on this platform: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

impl PortError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Reads and writes the enlistment's local git config.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitConfigAccessor: Send + Sync {
    /// Every local key with all of its values.
    async fn get_all_local_config(&self, enlistment: &Enlistment)
        -> Result<GitConfigMap, PortError>;

    /// Set exactly one key.
    async fn set_local_config(
        &self,
        enlistment: &Enlistment,
        key: &str,
        value: &str,
    ) -> Result<(), PortError>;
}

/// Runs `git --version` for the enlistment's git.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitVersionQuery: Send + Sync {
    /// Raw output text of the version query.
    async fn query_version(&self, enlistment: &Enlistment) -> Result<String, PortError>;
}

/// Finds installed git and companion tooling on disk.
#[cfg_attr(test, mockall::automock)]
pub trait GitToolingLocator: Send + Sync {
    /// Full path of the installed git executable.
    fn find_installed_bin_path(&self) -> Option<PathBuf>;

    /// First search directory holding a file called `file_name`.
    fn find_directory_containing(&self, file_name: &str) -> Option<PathBuf>;
}

/// Fetches the server's version policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteConfigClient: Send + Sync {
    /// `None` when the policy could not be fetched for any reason.
    async fn query_config(&self, repo_url: &str) -> Option<RemoteVersionPolicy>;
}

/// State of an installed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Running,
    /// Installed but not running; carries the state text the service manager reported.
    Stopped(String),
}

/// サービス状態の問い合わせエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceQueryError {
    #[error("service is not installed")]
    NotFound,

    #[error("unable to query the service manager: {0}")]
    Unavailable(String),
}

/// Queries the platform service manager.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceController: Send + Sync {
    async fn query_status(&self, name: &str) -> Result<ServiceState, ServiceQueryError>;
}

/// Antivirus exclusion list access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExclusionProvider: Send + Sync {
    async fn is_path_excluded(&self, path: &Path) -> Result<bool, PortError>;

    async fn add_exclusion(&self, path: &Path) -> Result<(), PortError>;
}

/// Reports whether the current process runs elevated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrivilegeProbe: Send + Sync {
    async fn is_elevated(&self) -> bool;
}
