use crate::application::ports::{ExclusionProvider, PrivilegeProbe};
use crate::common::error::VerbError;
use crate::common::reporter::ErrorReporter;
use std::path::Path;
use std::sync::Arc;

/// アンチウイルス除外の確認結果
///
/// `warning` is `None` when nothing needs to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionOutcome {
    pub excluded: bool,
    pub warning: Option<VerbError>,
}

impl ExclusionOutcome {
    fn excluded() -> Self {
        Self {
            excluded: true,
            warning: None,
        }
    }

    fn not_excluded(warning: VerbError) -> Self {
        Self {
            excluded: false,
            warning: Some(warning),
        }
    }

    /// 報告用メッセージ（報告不要なら空文字列）
    pub fn message(&self) -> String {
        self.warning
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Best-effort antivirus exclusion for the enlistment root. Never aborts.
pub struct ExclusionEnforcer {
    provider: Arc<dyn ExclusionProvider>,
    privileges: Arc<dyn PrivilegeProbe>,
}

impl ExclusionEnforcer {
    pub fn new(provider: Arc<dyn ExclusionProvider>, privileges: Arc<dyn PrivilegeProbe>) -> Self {
        Self {
            provider,
            privileges,
        }
    }

    pub async fn ensure_excluded(&self, path: &Path) -> ExclusionOutcome {
        match self.provider.is_path_excluded(path).await {
            Ok(true) => return ExclusionOutcome::excluded(),
            Ok(false) => {}
            Err(e) => {
                return ExclusionOutcome::not_excluded(VerbError::ExclusionQueryFailure {
                    detail: e.to_string(),
                })
            }
        }

        if !self.privileges.is_elevated().await {
            return ExclusionOutcome::not_excluded(VerbError::ExclusionElevationRequired {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(path = %path.display(), "adding antivirus exclusion");
        let add_error = self.provider.add_exclusion(path).await.err();

        // Re-query: the add call can report success without taking effect.
        match self.provider.is_path_excluded(path).await {
            Ok(true) => {
                if let Some(e) = add_error {
                    tracing::debug!(error = %e, "add reported an error but the path is excluded");
                }
                ExclusionOutcome::excluded()
            }
            Ok(false) => ExclusionOutcome::not_excluded(VerbError::ExclusionNotApplied {
                path: path.to_path_buf(),
                detail: add_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "the exclusion was not present after adding it".to_string()),
            }),
            Err(e) => ExclusionOutcome::not_excluded(VerbError::ExclusionQueryFailure {
                detail: e.to_string(),
            }),
        }
    }

    /// Run [`Self::ensure_excluded`] and surface any problem as a warning.
    pub async fn enforce(&self, path: &Path, reporter: &ErrorReporter) -> ExclusionOutcome {
        let outcome = self.ensure_excluded(path).await;
        if let Some(warning) = &outcome.warning {
            reporter.warn(warning);
        }
        outcome
    }
}
