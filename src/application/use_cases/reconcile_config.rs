use async_trait::async_trait;

use crate::application::frame::{Verb, VerbContext};
use crate::application::services::config_reconciler::ConfigReconciler;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use crate::domain::entities::enlistment::Enlistment;

/// `gvfs config`: bring the local git config to the required baseline.
#[derive(Debug, Default)]
pub struct ReconcileConfigVerb;

impl ReconcileConfigVerb {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Verb for ReconcileConfigVerb {
    fn name(&self) -> &'static str {
        "config"
    }

    async fn run(
        &self,
        ctx: &VerbContext,
        reporter: &ErrorReporter,
        enlistment: &Enlistment,
    ) -> VerbResult<()> {
        let reconciler =
            ConfigReconciler::new(ctx.baseline.clone(), ctx.collaborators.git_config.clone());
        let report = reconciler.ensure(enlistment, reporter).await?;

        if report.updated.is_empty() {
            reporter.info("Local git config already matches the required settings.");
        } else {
            for key in &report.updated {
                reporter.info(&format!("Set {key}"));
            }
            reporter.info(&format!(
                "Updated {} git config setting(s).",
                report.updated.len()
            ));
        }
        Ok(())
    }
}
