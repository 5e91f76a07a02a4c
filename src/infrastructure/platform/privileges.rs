use async_trait::async_trait;

use crate::application::ports::PrivilegeProbe;
use crate::infrastructure::process::CommandRunner;

/// Elevation check: `net session` succeeds only for administrators on
/// Windows; elsewhere the effective uid must be 0.
#[derive(Debug, Clone, Default)]
pub struct ProcessPrivilegeProbe {
    runner: CommandRunner,
}

impl ProcessPrivilegeProbe {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

/// `id -u` の出力がrootを示すか
pub fn is_root_uid(output: &str) -> bool {
    output.trim() == "0"
}

#[async_trait]
impl PrivilegeProbe for ProcessPrivilegeProbe {
    #[cfg(windows)]
    async fn is_elevated(&self) -> bool {
        match self.runner.run("net", &["session"], None).await {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::debug!(error = %e, "elevation probe failed");
                false
            }
        }
    }

    #[cfg(not(windows))]
    async fn is_elevated(&self) -> bool {
        match self.runner.run("id", &["-u"], None).await {
            Ok(output) => output.success() && is_root_uid(&output.stdout),
            Err(e) => {
                tracing::debug!(error = %e, "elevation probe failed");
                false
            }
        }
    }
}
