use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::{ServiceController, ServiceQueryError, ServiceState};
use crate::infrastructure::process::{CommandOutput, CommandRunner};

/// `sc query` reports an unknown service with this error number.
const SC_SERVICE_DOES_NOT_EXIST: i32 = 1060;

const SC_STATE_PATTERN: &str = r"(?m)^\s*STATE\s*:\s*\d+\s+(\w+)";

/// Service manager of the host: `sc` on Windows, `systemctl` elsewhere.
#[derive(Debug, Clone, Default)]
pub struct SystemServiceController {
    runner: CommandRunner,
}

impl SystemServiceController {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    #[cfg(windows)]
    async fn query(&self, name: &str) -> Result<ServiceState, ServiceQueryError> {
        let output = self
            .runner
            .run("sc", &["query", name], None)
            .await
            .map_err(|e| ServiceQueryError::Unavailable(e.to_string()))?;
        parse_sc_query(&output)
    }

    #[cfg(not(windows))]
    async fn query(&self, name: &str) -> Result<ServiceState, ServiceQueryError> {
        let output = self
            .runner
            .run(
                "systemctl",
                &["show", name, "--property=LoadState", "--property=ActiveState"],
                None,
            )
            .await
            .map_err(|e| ServiceQueryError::Unavailable(e.to_string()))?;
        parse_systemctl_show(&output)
    }
}

#[async_trait]
impl ServiceController for SystemServiceController {
    async fn query_status(&self, name: &str) -> Result<ServiceState, ServiceQueryError> {
        let state = self.query(name).await;
        tracing::debug!(service = name, state = ?state, "queried service");
        state
    }
}

fn failure_detail(output: &CommandOutput) -> String {
    let text = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    format!("'{}' exited with {:?}: {}", output.command, output.exit_code, text)
}

/// `sc query <name>` の出力を解析
pub fn parse_sc_query(output: &CommandOutput) -> Result<ServiceState, ServiceQueryError> {
    if output.exit_code == Some(SC_SERVICE_DOES_NOT_EXIST)
        || output
            .stdout
            .contains(&format!("FAILED {SC_SERVICE_DOES_NOT_EXIST}"))
    {
        return Err(ServiceQueryError::NotFound);
    }
    if !output.success() {
        return Err(ServiceQueryError::Unavailable(failure_detail(output)));
    }

    let pattern =
        Regex::new(SC_STATE_PATTERN).map_err(|e| ServiceQueryError::Unavailable(e.to_string()))?;
    let state = pattern
        .captures(&output.stdout)
        .and_then(|captures| captures.get(1))
        .map(|state| state.as_str())
        .ok_or_else(|| {
            ServiceQueryError::Unavailable(format!(
                "no STATE line in '{}' output",
                output.command
            ))
        })?;

    Ok(match state {
        "RUNNING" => ServiceState::Running,
        other => ServiceState::Stopped(other.to_string()),
    })
}

/// `systemctl show` の出力を解析
pub fn parse_systemctl_show(output: &CommandOutput) -> Result<ServiceState, ServiceQueryError> {
    if !output.success() {
        return Err(ServiceQueryError::Unavailable(failure_detail(output)));
    }

    let property = |name: &str| {
        output
            .stdout
            .lines()
            .filter_map(|line| line.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    };

    let load_state = property("LoadState").ok_or_else(|| {
        ServiceQueryError::Unavailable(format!("no LoadState in '{}' output", output.command))
    })?;
    if load_state == "not-found" {
        return Err(ServiceQueryError::NotFound);
    }

    match property("ActiveState").as_deref() {
        Some("active") => Ok(ServiceState::Running),
        Some(other) => Ok(ServiceState::Stopped(other.to_string())),
        None => Ok(ServiceState::Stopped("unknown".to_string())),
    }
}
