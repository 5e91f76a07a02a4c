use crate::domain::value_objects::client_version::ClientVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// サポートされるクライアントバージョンの範囲
///
/// `min` is inclusive; `max` is inclusive, or unbounded when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionRange {
    pub min: ClientVersion,
    #[serde(default)]
    pub max: Option<ClientVersion>,
}

impl VersionRange {
    pub fn new(min: ClientVersion, max: Option<ClientVersion>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, version: &ClientVersion) -> bool {
        *version >= self.min && self.max.map_or(true, |max| *version <= max)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, *)", self.min),
        }
    }
}

/// サーバーが公開するキャッシュサーバー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheServerInfo {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub global_default: bool,
}

/// `gvfs/config` エンドポイントのレスポンス
///
/// Fetched fresh for every check. An absent or empty range list means the
/// policy is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVersionPolicy {
    #[serde(rename = "AllowedGvfsClientVersions", default)]
    pub allowed_versions: Option<Vec<VersionRange>>,

    #[serde(rename = "CacheServers", default)]
    pub cache_servers: Option<Vec<CacheServerInfo>>,
}

impl RemoteVersionPolicy {
    pub fn new(ranges: Vec<VersionRange>) -> Self {
        Self {
            allowed_versions: Some(ranges),
            cache_servers: None,
        }
    }

    /// Ranges in server-supplied order, or `None` when the policy is unknown.
    pub fn ranges(&self) -> Option<&[VersionRange]> {
        self.allowed_versions
            .as_deref()
            .filter(|ranges| !ranges.is_empty())
    }

    pub fn cache_server_count(&self) -> usize {
        self.cache_servers.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(major: u32, minor: u32) -> ClientVersion {
        ClientVersion::new(major, minor, 0, 0)
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = VersionRange::new(v(1, 0), Some(v(2, 0)));
        assert!(range.contains(&v(1, 0)));
        assert!(range.contains(&v(1, 5)));
        assert!(range.contains(&v(2, 0)));
        assert!(!range.contains(&v(0, 9)));
        assert!(!range.contains(&ClientVersion::new(2, 0, 0, 1)));
    }

    #[test]
    fn test_unbounded_range() {
        let range = VersionRange::new(v(1, 0), None);
        assert!(range.contains(&v(99, 0)));
        assert_eq!(range.to_string(), "[1.0.0.0, *)");
    }

    #[test]
    fn test_empty_or_missing_ranges_are_unknown() {
        assert!(RemoteVersionPolicy::default().ranges().is_none());
        assert!(RemoteVersionPolicy::new(vec![]).ranges().is_none());
        assert_eq!(
            RemoteVersionPolicy::new(vec![VersionRange::new(v(1, 0), None)])
                .ranges()
                .map(<[VersionRange]>::len),
            Some(1)
        );
    }

    #[test]
    fn test_deserialize_server_response() {
        let json = r#"{
            "AllowedGvfsClientVersions": [
                {"Min": {"Major": 1, "Minor": 0, "Build": 0, "Revision": 0},
                 "Max": {"Major": 2, "Minor": 0, "Build": 0, "Revision": 0}},
                {"Min": {"Major": 3, "Minor": 1, "Build": -1, "Revision": -1}, "Max": null}
            ],
            "CacheServers": [
                {"Url": "https://cache.example.com", "Name": "West", "GlobalDefault": true}
            ]
        }"#;

        let policy: RemoteVersionPolicy = serde_json::from_str(json).unwrap();
        let ranges = policy.ranges().unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], VersionRange::new(v(1, 0), Some(v(2, 0))));
        assert_eq!(ranges[1], VersionRange::new(v(3, 1), None));
        assert_eq!(policy.cache_server_count(), 1);
    }

    #[test]
    fn test_deserialize_null_ranges() {
        let policy: RemoteVersionPolicy =
            serde_json::from_str(r#"{"AllowedGvfsClientVersions": null}"#).unwrap();
        assert!(policy.ranges().is_none());
    }
}
