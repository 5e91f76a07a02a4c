use crate::application::ports::GitVersionQuery;
use crate::common::error::VerbError;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use crate::domain::entities::enlistment::Enlistment;
use crate::domain::value_objects::git_version::{
    GitVersion, GitVersionMismatch, GitVersionParseError,
};
use std::sync::Arc;

/// インストール済みgitのバージョン検証
pub struct VersionGate {
    minimum: GitVersion,
    query: Arc<dyn GitVersionQuery>,
}

impl VersionGate {
    pub fn new(minimum: GitVersion, query: Arc<dyn GitVersionQuery>) -> Self {
        Self { minimum, query }
    }

    pub fn minimum(&self) -> &GitVersion {
        &self.minimum
    }

    pub fn parse(text: &str) -> Result<GitVersion, GitVersionParseError> {
        GitVersion::parse(text)
    }

    /// Platform first, then numeric order.
    pub fn compare(installed: &GitVersion, minimum: &GitVersion) -> Result<(), VerbError> {
        installed.satisfies(minimum).map_err(|mismatch| match mismatch {
            GitVersionMismatch::WrongPlatform => VerbError::WrongGitPlatform {
                installed: installed.to_string(),
                platform: minimum.platform.clone(),
            },
            GitVersionMismatch::TooOld => VerbError::GitTooOld {
                installed: installed.to_string(),
                minimum: minimum.to_string(),
            },
        })
    }

    /// Query, parse and compare once; any failure aborts the verb.
    pub async fn check(
        &self,
        enlistment: &Enlistment,
        reporter: &ErrorReporter,
    ) -> VerbResult<GitVersion> {
        let output = self.query.query_version(enlistment).await.map_err(|e| {
            reporter.fail(VerbError::GitVersionUnavailable {
                detail: e.to_string(),
            })
        })?;

        let installed = Self::parse(&output).map_err(|e| {
            tracing::debug!(error = %e, "git version output did not parse");
            reporter.fail(VerbError::GitVersionUnparsable {
                text: output.trim().to_string(),
            })
        })?;

        Self::compare(&installed, &self.minimum).map_err(|error| reporter.fail(error))?;

        tracing::debug!(installed = %installed, minimum = %self.minimum, "git version accepted");
        Ok(installed)
    }
}
