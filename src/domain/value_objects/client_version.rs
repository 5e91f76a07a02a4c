use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientVersionError {
    #[error("Invalid client version format: {0}")]
    InvalidFormat(String),
}

/// Four-part version of this tool, ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "WireVersion", into = "WireVersion")]
pub struct ClientVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl ClientVersion {
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Version of the running binary.
    pub fn current() -> Result<Self, ClientVersionError> {
        env!("CARGO_PKG_VERSION").parse()
    }
}

impl FromStr for ClientVersion {
    type Err = ClientVersionError;

    /// Accepts two to four dot-separated numbers; a semver pre-release or
    /// build suffix (`-beta`, `+meta`) is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let core = s
            .trim()
            .split(|c| c == '-' || c == '+')
            .next()
            .unwrap_or_default();

        let parts = core
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ClientVersionError::InvalidFormat(s.to_string()))?;

        if parts.len() < 2 || parts.len() > 4 {
            return Err(ClientVersionError::InvalidFormat(s.to_string()));
        }

        Ok(Self::new(
            parts[0],
            parts[1],
            parts.get(2).copied().unwrap_or(0),
            parts.get(3).copied().unwrap_or(0),
        ))
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// JSON shape used by the server (`System.Version` style). Unset parts are
/// sent as `-1` and read back as 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireVersion {
    major: i64,
    minor: i64,
    #[serde(default)]
    build: i64,
    #[serde(default)]
    revision: i64,
}

impl From<WireVersion> for ClientVersion {
    fn from(wire: WireVersion) -> Self {
        let clamp = |value: i64| u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        Self::new(
            clamp(wire.major),
            clamp(wire.minor),
            clamp(wire.build),
            clamp(wire.revision),
        )
    }
}

impl From<ClientVersion> for WireVersion {
    fn from(version: ClientVersion) -> Self {
        Self {
            major: i64::from(version.major),
            minor: i64::from(version.minor),
            build: i64::from(version.build),
            revision: i64::from(version.revision),
        }
    }
}
