use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal prefix printed by `git --version`.
pub const GIT_VERSION_PREFIX: &str = "git version ";

/// GitVersion関連のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitVersionParseError {
    #[error("Empty version text")]
    Empty,

    #[error("Missing {component} component in '{text}'")]
    MissingComponent { component: &'static str, text: String },

    #[error("Invalid {component} component '{value}' in '{text}'")]
    InvalidComponent {
        component: &'static str,
        value: String,
        text: String,
    },
}

/// Why an installed git does not satisfy the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitVersionMismatch {
    /// Platform tags differ; numeric order is not consulted.
    WrongPlatform,
    /// Same platform but numerically older.
    TooOld,
}

/// Gitバージョンの値オブジェクト
///
/// `major.minor.patch[.platform[.revision[.minor_revision]]]`
///
/// Deliberately not `Ord`: two versions with different platform tags are not
/// comparable, see [`GitVersion::satisfies`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// プラットフォームタグ（例: `windows`, `vfs`）。無い場合は空文字列
    pub platform: String,
    pub revision: u32,
    pub minor_revision: u32,
}

impl GitVersion {
    /// 新しいGitVersionインスタンスを作成
    pub fn new(major: u32, minor: u32, patch: u32, platform: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            platform: platform.into(),
            revision: 0,
            minor_revision: 0,
        }
    }

    /// リビジョンを設定
    pub fn with_revision(mut self, revision: u32, minor_revision: u32) -> Self {
        self.revision = revision;
        self.minor_revision = minor_revision;
        self
    }

    /// `git --version` の出力を解析
    ///
    /// The `git version ` prefix is optional and anything after the first
    /// whitespace (e.g. `(Apple Git-143)`) is ignored.
    pub fn parse(text: &str) -> Result<Self, GitVersionParseError> {
        let trimmed = text.trim();
        let rest = trimmed.strip_prefix(GIT_VERSION_PREFIX).unwrap_or(trimmed);
        let token = rest
            .split_whitespace()
            .next()
            .ok_or(GitVersionParseError::Empty)?;

        let mut parts = token.split('.');
        let major = Self::parse_component(parts.next(), "major", token)?;
        let minor = Self::parse_component(parts.next(), "minor", token)?;
        let patch = Self::parse_component(parts.next(), "patch", token)?;

        let platform = parts.next().unwrap_or_default().to_string();
        let revision = match parts.next() {
            Some(value) => Self::parse_component(Some(value), "revision", token)?,
            None => 0,
        };
        let minor_revision = match parts.next() {
            Some(value) => Self::parse_component(Some(value), "minor revision", token)?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            patch,
            platform,
            revision,
            minor_revision,
        })
    }

    fn parse_component(
        value: Option<&str>,
        component: &'static str,
        text: &str,
    ) -> Result<u32, GitVersionParseError> {
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| GitVersionParseError::MissingComponent {
                component,
                text: text.to_string(),
            })?;

        value
            .parse()
            .map_err(|_| GitVersionParseError::InvalidComponent {
                component,
                value: value.to_string(),
                text: text.to_string(),
            })
    }

    /// 数値部分のみで比較（プラットフォームは無視）
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        (
            self.major,
            self.minor,
            self.patch,
            self.revision,
            self.minor_revision,
        )
            .cmp(&(
                other.major,
                other.minor,
                other.patch,
                other.revision,
                other.minor_revision,
            ))
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.platform == platform
    }

    /// Check this installed version against a required minimum.
    ///
    /// A platform mismatch wins over any numeric relationship.
    pub fn satisfies(&self, minimum: &GitVersion) -> Result<(), GitVersionMismatch> {
        if !self.has_platform(&minimum.platform) {
            return Err(GitVersionMismatch::WrongPlatform);
        }

        if self.numeric_cmp(minimum) == Ordering::Less {
            return Err(GitVersionMismatch::TooOld);
        }

        Ok(())
    }
}

impl FromStr for GitVersion {
    type Err = GitVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.platform.is_empty() {
            write!(
                f,
                ".{}.{}.{}",
                self.platform, self.revision, self.minor_revision
            )?;
        }
        Ok(())
    }
}
