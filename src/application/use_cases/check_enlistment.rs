use async_trait::async_trait;

use crate::application::frame::{Verb, VerbContext};
use crate::application::services::config_reconciler::ConfigReconciler;
use crate::application::services::exclusion_enforcer::ExclusionEnforcer;
use crate::application::services::remote_compatibility::RemoteCompatibilityChecker;
use crate::application::services::service_health::ServiceHealthChecker;
use crate::application::services::version_gate::VersionGate;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use crate::domain::entities::enlistment::Enlistment;

/// `gvfs check`: 全ての事前チェックを順番に実行
///
/// Order: virtualization service, git version, server version policy,
/// local git config, antivirus exclusion. Steps switched off in the settings
/// are skipped. The policy and exclusion steps only ever warn.
#[derive(Debug, Default)]
pub struct CheckEnlistmentVerb;

impl CheckEnlistmentVerb {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Verb for CheckEnlistmentVerb {
    fn name(&self) -> &'static str {
        "check"
    }

    async fn run(
        &self,
        ctx: &VerbContext,
        reporter: &ErrorReporter,
        enlistment: &Enlistment,
    ) -> VerbResult<()> {
        let settings = &ctx.settings;
        let collaborators = &ctx.collaborators;

        if settings.check_virtualization_service {
            ServiceHealthChecker::new(collaborators.services.clone())
                .require_running(&settings.service_name, reporter)
                .await?;
        }

        let installed = VersionGate::new(
            ctx.minimum_git_version.clone(),
            collaborators.git_version.clone(),
        )
        .check(enlistment, reporter)
        .await?;

        if settings.check_remote_policy {
            RemoteCompatibilityChecker::new(collaborators.remote_config.clone())
                .check(&ctx.client_version, enlistment, reporter)
                .await?;
        } else {
            tracing::debug!("server version policy check disabled");
        }

        let report = ConfigReconciler::new(ctx.baseline.clone(), collaborators.git_config.clone())
            .ensure(enlistment, reporter)
            .await?;

        if settings.check_antivirus_exclusion {
            ExclusionEnforcer::new(collaborators.exclusions.clone(), collaborators.privileges.clone())
                .enforce(enlistment.enlistment_root(), reporter)
                .await;
        }

        reporter.info(&format!(
            "Enlistment '{}' is ready (git {}, {} config setting(s) updated).",
            enlistment.enlistment_root().display(),
            installed,
            report.updated.len()
        ));
        Ok(())
    }
}
