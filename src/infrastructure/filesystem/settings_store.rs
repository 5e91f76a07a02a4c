use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs as async_fs;
use validator::Validate;

use crate::domain::entities::tool_settings::ToolSettings;
use crate::domain::value_objects::git_version::GitVersionParseError;

/// Settings store related errors
#[derive(Debug, Error)]
pub enum SettingsStoreError {
    #[error("Settings file not found at path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Settings file read failed: {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing failed: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Settings validation failed: {0}")]
    ValidationFailed(#[from] validator::ValidationErrors),

    #[error("Invalid minimum_git_version: {0}")]
    InvalidMinimumGitVersion(#[from] GitVersionParseError),
}

/// 設定ファイル（YAML）の読み込み
///
/// A missing `--settings` path means built-in defaults. A path that was
/// given but does not exist is an error.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore;

impl SettingsStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, path: Option<&Path>) -> Result<ToolSettings, SettingsStoreError> {
        let Some(path) = path else {
            tracing::debug!("no settings file given, using defaults");
            return Ok(ToolSettings::default());
        };

        if !path.exists() {
            return Err(SettingsStoreError::NotFound(path.to_path_buf()));
        }

        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| SettingsStoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let settings = self.parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// YAMLを解析して検証
    pub fn parse(&self, content: &str) -> Result<ToolSettings, SettingsStoreError> {
        let settings: ToolSettings = if content.trim().is_empty() {
            ToolSettings::default()
        } else {
            serde_yaml::from_str(content)?
        };

        settings.validate()?;
        settings.parsed_minimum_git_version()?;
        Ok(settings)
    }
}
