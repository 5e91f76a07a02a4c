use async_trait::async_trait;

use crate::application::ports::{GitConfigAccessor, GitConfigMap, GitVersionQuery, PortError};
use crate::domain::entities::enlistment::Enlistment;
use crate::domain::value_objects::git_config_setting::{normalize_key, GitConfigSetting};
use crate::infrastructure::process::CommandRunner;

/// Drives the installed `git` binary for one enlistment.
///
/// Config access is always `--local`; values are read with `-z` so values
/// containing newlines survive.
#[derive(Debug, Clone, Default)]
pub struct GitProcess {
    runner: CommandRunner,
}

impl GitProcess {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    async fn git(&self, enlistment: &Enlistment, args: &[&str]) -> Result<String, PortError> {
        self.runner
            .run(
                enlistment.git_bin_path(),
                args,
                Some(enlistment.working_directory_root()),
            )
            .await?
            .into_stdout()
    }
}

/// `git config --list -z` の出力を解析
///
/// Entries are NUL-terminated; key and value are separated by the first
/// newline. A key without a newline is a boolean shorthand and gets an
/// empty value.
pub fn parse_config_list(output: &str) -> GitConfigMap {
    let mut settings = GitConfigMap::new();
    for entry in output.split('\0').filter(|entry| !entry.is_empty()) {
        let (key, value) = entry.split_once('\n').unwrap_or((entry, ""));
        let key = normalize_key(key);
        settings
            .entry(key.clone())
            .or_insert_with(|| GitConfigSetting::new(key))
            .add_value(value);
    }
    settings
}

#[async_trait]
impl GitConfigAccessor for GitProcess {
    async fn get_all_local_config(
        &self,
        enlistment: &Enlistment,
    ) -> Result<GitConfigMap, PortError> {
        let output = self
            .git(enlistment, &["config", "--local", "--list", "-z"])
            .await?;
        Ok(parse_config_list(&output))
    }

    async fn set_local_config(
        &self,
        enlistment: &Enlistment,
        key: &str,
        value: &str,
    ) -> Result<(), PortError> {
        self.git(enlistment, &["config", "--local", key, value])
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl GitVersionQuery for GitProcess {
    async fn query_version(&self, enlistment: &Enlistment) -> Result<String, PortError> {
        self.runner
            .run(enlistment.git_bin_path(), &["--version"], None)
            .await?
            .into_stdout()
    }
}
