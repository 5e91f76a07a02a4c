use crate::application::ports::RemoteConfigClient;
use crate::common::error::VerbError;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use crate::domain::entities::enlistment::Enlistment;
use crate::domain::entities::remote_version_policy::RemoteVersionPolicy;
use crate::domain::value_objects::client_version::ClientVersion;
use std::sync::Arc;

const POLICY_FETCH_FAILED: &str = "Could not query the server for the allowed GVFS versions.";
const POLICY_EMPTY: &str = "The server did not declare any allowed GVFS versions.";

/// サーバーポリシーに対する判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityOutcome {
    /// Index of the first range containing the current version.
    Accepted { range_index: usize },
    /// Policy unknown; the verb continues.
    Warned { warning: VerbError },
    Rejected,
}

/// Checks this client's version against the server's allowed ranges.
///
/// Unreachable servers and empty policies only warn.
pub struct RemoteCompatibilityChecker {
    client: Arc<dyn RemoteConfigClient>,
}

impl RemoteCompatibilityChecker {
    pub fn new(client: Arc<dyn RemoteConfigClient>) -> Self {
        Self { client }
    }

    /// Ranges are scanned in server order; the first match wins.
    pub fn validate(
        current: &ClientVersion,
        policy: Option<&RemoteVersionPolicy>,
    ) -> CompatibilityOutcome {
        let Some(policy) = policy else {
            return Self::warned(POLICY_FETCH_FAILED);
        };
        let Some(ranges) = policy.ranges() else {
            return Self::warned(POLICY_EMPTY);
        };

        match ranges.iter().position(|range| range.contains(current)) {
            Some(range_index) => CompatibilityOutcome::Accepted { range_index },
            None => CompatibilityOutcome::Rejected,
        }
    }

    fn warned(detail: &str) -> CompatibilityOutcome {
        CompatibilityOutcome::Warned {
            warning: VerbError::remote_policy_unavailable(detail),
        }
    }

    /// One fetch, then warn or abort according to [`Self::validate`].
    pub async fn check(
        &self,
        current: &ClientVersion,
        enlistment: &Enlistment,
        reporter: &ErrorReporter,
    ) -> VerbResult<CompatibilityOutcome> {
        let policy = self.client.query_config(enlistment.repo_url()).await;
        if let Some(policy) = &policy {
            tracing::debug!(
                cache_servers = policy.cache_server_count(),
                "received gvfs/config"
            );
        }

        let outcome = Self::validate(current, policy.as_ref());
        match &outcome {
            CompatibilityOutcome::Accepted { range_index } => {
                tracing::debug!(%current, range_index, "client version is allowed");
            }
            CompatibilityOutcome::Warned { warning } => reporter.warn(warning),
            CompatibilityOutcome::Rejected => {
                return Err(reporter.fail(VerbError::RemotePolicyRejected {
                    current: current.to_string(),
                }));
            }
        }
        Ok(outcome)
    }
}
