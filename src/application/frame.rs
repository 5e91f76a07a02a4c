//! Verb execution frame.
//!
//! [`VerbFrame::execute`] is the only place an [`Abort`] is consumed: it
//! resolves the enlistment through [`Preflight`], hands it to the verb, and
//! turns the outcome into an [`ExitCode`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{
    ExclusionProvider, GitConfigAccessor, GitToolingLocator, GitVersionQuery, OutputSink,
    PrivilegeProbe, RemoteConfigClient, ServiceController,
};
use crate::common::error::{Abort, ExitCode, VerbError};
use crate::common::reporter::ErrorReporter;
use crate::common::result::{OptionExt, ResultExt, VerbResult};
use crate::domain::entities::config_baseline::ConfigBaseline;
use crate::domain::entities::enlistment::Enlistment;
use crate::domain::entities::tool_settings::ToolSettings;
use crate::domain::value_objects::client_version::{ClientVersion, ClientVersionError};
use crate::domain::value_objects::git_version::{GitVersion, GitVersionParseError};

/// 外部システムとの連携部品一式
#[derive(Clone)]
pub struct Collaborators {
    pub git_config: Arc<dyn GitConfigAccessor>,
    pub git_version: Arc<dyn GitVersionQuery>,
    pub tooling: Arc<dyn GitToolingLocator>,
    pub remote_config: Arc<dyn RemoteConfigClient>,
    pub services: Arc<dyn ServiceController>,
    pub exclusions: Arc<dyn ExclusionProvider>,
    pub privileges: Arc<dyn PrivilegeProbe>,
}

#[derive(Debug, thiserror::Error)]
pub enum VerbContextError {
    #[error("Invalid minimum git version: {0}")]
    MinimumGitVersion(#[from] GitVersionParseError),

    #[error("Invalid client version: {0}")]
    ClientVersion(#[from] ClientVersionError),
}

/// Read-only state shared by every verb of one process.
#[derive(Clone)]
pub struct VerbContext {
    pub settings: Arc<ToolSettings>,
    pub baseline: Arc<ConfigBaseline>,
    pub minimum_git_version: GitVersion,
    pub client_version: ClientVersion,
    pub collaborators: Collaborators,
    pub sink: Arc<dyn OutputSink>,
}

impl VerbContext {
    /// Merge the baseline and parse the minimum git version once.
    pub fn new(
        settings: ToolSettings,
        collaborators: Collaborators,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self, VerbContextError> {
        let minimum_git_version = settings.parsed_minimum_git_version()?;
        let baseline = Arc::new(settings.config_baseline());
        Ok(Self {
            settings: Arc::new(settings),
            baseline,
            minimum_git_version,
            client_version: ClientVersion::current()?,
            collaborators,
            sink,
        })
    }

    pub fn with_client_version(mut self, client_version: ClientVersion) -> Self {
        self.client_version = client_version;
        self
    }
}

/// A command that needs a valid enlistment before it can run.
#[async_trait]
pub trait Verb: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        ctx: &VerbContext,
        reporter: &ErrorReporter,
        enlistment: &Enlistment,
    ) -> VerbResult<()>;
}

/// エンリストメントの解決と検証
pub struct Preflight<'a> {
    ctx: &'a VerbContext,
}

impl<'a> Preflight<'a> {
    pub fn new(ctx: &'a VerbContext) -> Self {
        Self { ctx }
    }

    /// Locate git, then the hooks, then validate the enlistment at `root`.
    ///
    /// An empty `root` means the current directory. The enlistment root is
    /// the closest ancestor holding `.gvfs`.
    pub fn resolve(&self, root: &Path, reporter: &ErrorReporter) -> VerbResult<Enlistment> {
        let start = self.start_directory(root, reporter)?;
        let tooling = &self.ctx.collaborators.tooling;

        let git_bin_path = tooling
            .find_installed_bin_path()
            .or_abort(reporter, || VerbError::GitNotInstalled)?;
        tracing::debug!(git = %git_bin_path.display(), "found git");

        let hooks_name = &self.ctx.settings.hooks_executable_name;
        let hooks_bin_dir = tooling
            .find_directory_containing(hooks_name)
            .or_abort(reporter, || VerbError::hooks_not_found(hooks_name.as_str()))?;

        let enlistment_root = Enlistment::discover_root(&start).unwrap_or_else(|| start.clone());
        Enlistment::create(&enlistment_root, git_bin_path, hooks_bin_dir)
            .or_abort(reporter, |e| {
                VerbError::invalid_enlistment(&enlistment_root, e.to_string())
            })
    }

    /// Relative roots are taken from the current directory so that the
    /// ancestor walk never ends at an empty path.
    fn start_directory(&self, root: &Path, reporter: &ErrorReporter) -> VerbResult<PathBuf> {
        if root.is_absolute() {
            return Ok(root.to_path_buf());
        }
        let current = std::env::current_dir()
            .or_abort(reporter, |e| VerbError::invalid_enlistment(root, e.to_string()))?;
        if root.as_os_str().is_empty() {
            Ok(current)
        } else {
            Ok(current.join(root))
        }
    }
}

/// Runs one verb and reports how it ended.
pub struct VerbFrame<'a> {
    ctx: &'a VerbContext,
}

impl<'a> VerbFrame<'a> {
    pub fn new(ctx: &'a VerbContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, verb: &dyn Verb, root: &Path) -> ExitCode {
        let reporter = ErrorReporter::new(verb.name(), self.ctx.sink.clone());
        tracing::debug!(verb = verb.name(), root = %root.display(), "starting verb");

        match self.run(verb, root, &reporter).await {
            Ok(()) => {
                tracing::debug!(verb = verb.name(), "verb finished");
                ExitCode::Success
            }
            Err(abort) => {
                tracing::debug!(verb = verb.name(), "{}", abort);
                abort.exit_code()
            }
        }
    }

    async fn run(&self, verb: &dyn Verb, root: &Path, reporter: &ErrorReporter) -> Result<(), Abort> {
        let enlistment = Preflight::new(self.ctx).resolve(root, reporter)?;
        verb.run(self.ctx, reporter, &enlistment).await
    }
}
