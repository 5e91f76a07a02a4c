use crate::domain::entities::config_baseline::ConfigBaseline;
use crate::domain::value_objects::git_version::{GitVersion, GitVersionParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Minimum git build a virtualized enlistment works with.
pub const DEFAULT_MINIMUM_GIT_VERSION: &str = "2.20.1.vfs.1.1";

#[cfg(windows)]
pub const DEFAULT_SERVICE_NAME: &str = "PrjFlt";
#[cfg(not(windows))]
pub const DEFAULT_SERVICE_NAME: &str = "gvfs.service";

#[cfg(windows)]
pub const DEFAULT_HOOKS_EXECUTABLE: &str = "GVFS.Hooks.exe";
#[cfg(not(windows))]
pub const DEFAULT_HOOKS_EXECUTABLE: &str = "gvfs-hooks";

/// ツール全体の設定
///
/// Loaded once at process start and shared read-only for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ToolSettings {
    /// 組み込みのベースラインに追加・上書きするgit設定
    pub required_config: BTreeMap<String, String>,

    /// 必要な最小gitバージョン
    #[validate(length(min = 5))]
    pub minimum_git_version: String,

    /// 仮想化ドライバのサービス名
    #[validate(length(min = 1, max = 255))]
    pub service_name: String,

    /// フック実行ファイル名
    #[validate(length(min = 1, max = 255))]
    pub hooks_executable_name: String,

    /// `gvfs/config` 取得のタイムアウト（秒）
    #[validate(range(min = 1, max = 600))]
    pub remote_timeout_seconds: u64,

    /// 仮想化サービスの稼働確認を行うか
    pub check_virtualization_service: bool,

    /// サーバーのクライアントバージョンポリシーを確認するか
    pub check_remote_policy: bool,

    /// アンチウイルス除外を確認するか
    pub check_antivirus_exclusion: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            required_config: BTreeMap::new(),
            minimum_git_version: DEFAULT_MINIMUM_GIT_VERSION.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            hooks_executable_name: DEFAULT_HOOKS_EXECUTABLE.to_string(),
            remote_timeout_seconds: 30,
            check_virtualization_service: true,
            check_remote_policy: true,
            check_antivirus_exclusion: cfg!(windows),
        }
    }
}

impl ToolSettings {
    /// 組み込みベースラインに上書き設定を適用
    pub fn config_baseline(&self) -> ConfigBaseline {
        ConfigBaseline::builtin().with_overrides(&self.required_config)
    }

    pub fn parsed_minimum_git_version(&self) -> Result<GitVersion, GitVersionParseError> {
        GitVersion::parse(&self.minimum_git_version)
    }
}
