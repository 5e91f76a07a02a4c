use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

use crate::application::ports::PortError;

/// Command runner errors
#[derive(Debug, Error)]
pub enum CommandRunnerError {
    #[error("failed to start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {timeout_seconds} seconds")]
    Timeout {
        command: String,
        timeout_seconds: u64,
    },
}

impl From<CommandRunnerError> for PortError {
    fn from(error: CommandRunnerError) -> Self {
        match &error {
            CommandRunnerError::SpawnFailed { command, source } => PortError::LaunchFailed {
                command: command.clone(),
                message: source.to_string(),
            },
            CommandRunnerError::Timeout { .. } => PortError::other(error.to_string()),
        }
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Command line, for messages
    pub command: String,

    /// Exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,

    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// `Ok(stdout)` on success, otherwise a `CommandFailed` port error.
    pub fn into_stdout(self) -> Result<String, PortError> {
        if self.success() {
            return Ok(self.stdout);
        }
        Err(PortError::CommandFailed {
            command: self.command,
            exit_code: self.exit_code.unwrap_or(-1),
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs external programs and captures their output.
///
/// One process at a time; callers await each run before starting the next.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    timeout_seconds: Option<u64>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub async fn run<S: AsRef<OsStr>>(
        &self,
        program: impl AsRef<OsStr>,
        args: &[S],
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandRunnerError> {
        let command_line = Self::describe(program.as_ref(), args);
        let mut cmd = Command::new(program.as_ref());
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(command = %command_line, "running");
        let output = match self.timeout_seconds {
            Some(seconds) => timeout(Duration::from_secs(seconds), cmd.output())
                .await
                .map_err(|_| CommandRunnerError::Timeout {
                    command: command_line.clone(),
                    timeout_seconds: seconds,
                })?,
            None => cmd.output().await,
        }
        .map_err(|source| CommandRunnerError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;

        let result = CommandOutput {
            command: command_line,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(command = %result.command, exit_code = ?result.exit_code, "finished");
        Ok(result)
    }

    fn describe<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
        std::iter::once(program)
            .chain(args.iter().map(|arg| AsRef::<OsStr>::as_ref(arg)))
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failed_output_becomes_port_error() {
        let output = CommandOutput {
            command: "git config --local gc.auto 0".to_string(),
            exit_code: Some(255),
            stdout: String::new(),
            stderr: "error: could not lock config file\n".to_string(),
        };
        assert_eq!(
            output.into_stdout(),
            Err(PortError::CommandFailed {
                command: "git config --local gc.auto 0".to_string(),
                exit_code: 255,
                stderr: "error: could not lock config file".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_failure() {
        let runner = CommandRunner::new();
        let error = runner
            .run("definitely-not-a-real-program-gvfs", &["--version"], None)
            .await
            .unwrap_err();
        assert!(matches!(error, CommandRunnerError::SpawnFailed { .. }));
        assert!(matches!(PortError::from(error), PortError::LaunchFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = CommandRunner::new().with_timeout(10);
        let output = runner.run("sh", &["-c", "echo hello; exit 3"], None).await.unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }
}
