use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{ExclusionProvider, PortError};
use crate::infrastructure::process::CommandRunner;

/// Windows Defender exclusions through PowerShell.
///
/// On other platforms every call reports `PortError::Unsupported`.
#[derive(Debug, Clone, Default)]
pub struct DefenderExclusionProvider {
    runner: CommandRunner,
}

impl DefenderExclusionProvider {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    async fn powershell(&self, script: &str) -> Result<String, PortError> {
        self.runner
            .run(
                "powershell",
                &["-NoProfile", "-NonInteractive", "-Command", script],
                None,
            )
            .await?
            .into_stdout()
    }
}

/// Single-quote `path` for a PowerShell command line.
pub fn quote_powershell(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}

fn normalize_path(path: &str) -> String {
    path.trim()
        .trim_end_matches(|c| c == '\\' || c == '/')
        .to_lowercase()
}

/// `(Get-MpPreference).ExclusionPath` の出力に `path` が含まれるか
///
/// Case-insensitive; trailing separators are ignored.
pub fn exclusion_list_contains(output: &str, path: &Path) -> bool {
    let wanted = normalize_path(&path.display().to_string());
    output
        .lines()
        .map(normalize_path)
        .any(|excluded| !excluded.is_empty() && excluded == wanted)
}

#[async_trait]
impl ExclusionProvider for DefenderExclusionProvider {
    #[cfg(windows)]
    async fn is_path_excluded(&self, path: &Path) -> Result<bool, PortError> {
        let output = self
            .powershell("(Get-MpPreference).ExclusionPath")
            .await?;
        Ok(exclusion_list_contains(&output, path))
    }

    #[cfg(not(windows))]
    async fn is_path_excluded(&self, _path: &Path) -> Result<bool, PortError> {
        Err(PortError::Unsupported(
            "antivirus exclusions are only managed on Windows".to_string(),
        ))
    }

    #[cfg(windows)]
    async fn add_exclusion(&self, path: &Path) -> Result<(), PortError> {
        let script = format!("Add-MpPreference -ExclusionPath {}", quote_powershell(path));
        self.powershell(&script).await.map(|_| ())
    }

    #[cfg(not(windows))]
    async fn add_exclusion(&self, _path: &Path) -> Result<(), PortError> {
        Err(PortError::Unsupported(
            "antivirus exclusions are only managed on Windows".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exclusion_list_match_is_case_insensitive() {
        let output = "C:\\Temp\r\nC:\\Repos\\OS\\\r\n";
        assert!(exclusion_list_contains(output, Path::new("c:\\repos\\os")));
        assert!(exclusion_list_contains(output, Path::new("C:\\Temp\\")));
        assert!(!exclusion_list_contains(output, Path::new("C:\\Repos")));
        assert!(!exclusion_list_contains("", Path::new("C:\\Repos")));
    }

    #[test]
    fn test_quote_powershell() {
        assert_eq!(quote_powershell(Path::new("C:\\it's")), "'C:\\it''s'");
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_unsupported_off_windows() {
        let provider = DefenderExclusionProvider::default();
        assert!(matches!(
            provider.is_path_excluded(Path::new("/repo")).await,
            Err(PortError::Unsupported(_))
        ));
    }
}
