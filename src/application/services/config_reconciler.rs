use crate::application::ports::GitConfigAccessor;
use crate::common::error::VerbError;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use crate::domain::entities::config_baseline::ConfigBaseline;
use crate::domain::entities::enlistment::Enlistment;
use std::sync::Arc;

/// 設定調整の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// 値を書き込んだキー（書き込み順）
    pub updated: Vec<String>,

    /// 既に必要な値だったキーの数
    pub unchanged: usize,
}

/// ローカルgit設定を必須ベースラインに揃えるサービス
///
/// The local config is read once. Each key that is missing or holds a
/// different value gets its own set operation, in sorted key order. Keys
/// already written stay written when a later set fails, and no further sets
/// are attempted after the first failure.
pub struct ConfigReconciler {
    baseline: Arc<ConfigBaseline>,
    accessor: Arc<dyn GitConfigAccessor>,
}

impl ConfigReconciler {
    pub fn new(baseline: Arc<ConfigBaseline>, accessor: Arc<dyn GitConfigAccessor>) -> Self {
        Self { baseline, accessor }
    }

    /// `true` only when every baseline key ends at its required value.
    pub async fn reconcile(&self, enlistment: &Enlistment) -> bool {
        self.try_reconcile(enlistment).await.is_ok()
    }

    pub async fn try_reconcile(&self, enlistment: &Enlistment) -> Result<ReconcileReport, VerbError> {
        let current = self
            .accessor
            .get_all_local_config(enlistment)
            .await
            .map_err(|e| VerbError::config_read_failure(e.to_string()))?;

        let mut report = ReconcileReport::default();
        for (key, required) in self.baseline.iter() {
            let satisfied = current
                .get(key)
                .map_or(false, |setting| setting.has_value(required));
            if satisfied {
                report.unchanged += 1;
                continue;
            }

            tracing::debug!(key, value = required, "setting local git config");
            self.accessor
                .set_local_config(enlistment, key, required)
                .await
                .map_err(|e| VerbError::config_write_failure(key, e.to_string()))?;
            report.updated.push(key.to_string());
        }

        tracing::info!(
            updated = report.updated.len(),
            unchanged = report.unchanged,
            "local git config reconciled"
        );
        Ok(report)
    }

    /// Reconcile, aborting the verb on a read or write failure.
    pub async fn ensure(
        &self,
        enlistment: &Enlistment,
        reporter: &ErrorReporter,
    ) -> VerbResult<ReconcileReport> {
        self.try_reconcile(enlistment)
            .await
            .map_err(|error| reporter.fail(error))
    }
}
