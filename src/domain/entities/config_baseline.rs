use crate::domain::value_objects::git_config_setting::normalize_key;
use std::collections::BTreeMap;

/// Settings every virtualized enlistment needs in its local git config.
const BUILTIN_REQUIRED_SETTINGS: &[(&str, &str)] = &[
    ("am.keepcr", "true"),
    ("core.autocrlf", "false"),
    ("core.filemode", "false"),
    ("core.fscache", "true"),
    ("core.multipackindex", "true"),
    ("core.preloadindex", "true"),
    ("core.safecrlf", "false"),
    ("core.untrackedcache", "false"),
    ("credential.validate", "false"),
    ("diff.autorefreshindex", "false"),
    ("gc.auto", "0"),
    ("gui.gcwarning", "false"),
    ("index.threads", "true"),
    ("index.version", "4"),
    ("merge.renames", "false"),
    ("merge.stat", "false"),
    ("pack.usebitmaps", "false"),
    ("pack.usesparse", "true"),
    ("receive.autogc", "false"),
    ("reset.quiet", "true"),
    ("status.aheadbehind", "false"),
];

/// 必須のgit設定（キー → 値）
///
/// Built once at process start and never mutated afterwards. Keys are stored
/// normalized (see [`normalize_key`]) and iterate in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBaseline {
    entries: BTreeMap<String, String>,
}

impl ConfigBaseline {
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_REQUIRED_SETTINGS
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (normalize_key(key.as_ref()), value.into()))
                .collect(),
        }
    }

    /// Layer `overrides` on top; an override replaces a built-in value.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in overrides {
            self.entries.insert(normalize_key(key), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConfigBaseline {
    fn default() -> Self {
        Self::builtin()
    }
}
