//! Mock services for testing
//!
//! Each fake records every call in a shared [`CallLog`] so tests can check
//! both what happened and in which order.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gvfs::application::frame::Collaborators;
use gvfs::application::ports::{
    ExclusionProvider, GitConfigAccessor, GitConfigMap, GitToolingLocator, GitVersionQuery,
    OutputSink, PortError, PrivilegeProbe, RemoteConfigClient, ServiceController,
    ServiceQueryError, ServiceState,
};
use gvfs::domain::entities::enlistment::Enlistment;
use gvfs::domain::entities::remote_version_policy::{RemoteVersionPolicy, VersionRange};
use gvfs::domain::value_objects::client_version::ClientVersion;
use gvfs::domain::value_objects::git_config_setting::GitConfigSetting;

/// Shared, ordered call history
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

/// Output sink capturing lines with a level prefix
#[derive(Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<String>>,
}

impl CapturingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputSink for CapturingSink {
    fn write_line(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("info: {message}"));
    }

    fn write_warning(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("warn: {message}"));
    }

    fn write_error(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("error: {message}"));
    }
}

pub struct FakeTooling {
    pub git: Option<PathBuf>,
    pub hooks: Option<PathBuf>,
    pub log: CallLog,
}

impl GitToolingLocator for FakeTooling {
    fn find_installed_bin_path(&self) -> Option<PathBuf> {
        self.log.record("tooling:git");
        self.git.clone()
    }

    fn find_directory_containing(&self, file_name: &str) -> Option<PathBuf> {
        self.log.record(format!("tooling:find {file_name}"));
        self.hooks.clone()
    }
}

/// In-memory local git config plus a canned `git --version` answer
pub struct FakeGit {
    pub config: Mutex<GitConfigMap>,
    pub version_output: Result<String, PortError>,
    pub failing_key: Option<String>,
    pub log: CallLog,
}

impl FakeGit {
    pub fn value(&self, key: &str) -> Option<Vec<String>> {
        self.config.lock().unwrap().get(key).map(|s| s.values.clone())
    }
}

#[async_trait]
impl GitConfigAccessor for FakeGit {
    async fn get_all_local_config(&self, _: &Enlistment) -> Result<GitConfigMap, PortError> {
        self.log.record("git:config --list");
        Ok(self.config.lock().unwrap().clone())
    }

    async fn set_local_config(
        &self,
        _: &Enlistment,
        key: &str,
        value: &str,
    ) -> Result<(), PortError> {
        self.log.record(format!("git:config {key} {value}"));
        if self.failing_key.as_deref() == Some(key) {
            return Err(PortError::other("could not lock config file"));
        }
        self.config
            .lock()
            .unwrap()
            .insert(key.to_string(), GitConfigSetting::new(key).with_value(value));
        Ok(())
    }
}

#[async_trait]
impl GitVersionQuery for FakeGit {
    async fn query_version(&self, _: &Enlistment) -> Result<String, PortError> {
        self.log.record("git:--version");
        self.version_output.clone()
    }
}

pub struct FakeRemote {
    pub policy: Option<RemoteVersionPolicy>,
    pub log: CallLog,
}

#[async_trait]
impl RemoteConfigClient for FakeRemote {
    async fn query_config(&self, repo_url: &str) -> Option<RemoteVersionPolicy> {
        self.log.record(format!("remote:{repo_url}"));
        self.policy.clone()
    }
}

pub struct FakeServices {
    pub status: Result<ServiceState, ServiceQueryError>,
    pub log: CallLog,
}

#[async_trait]
impl ServiceController for FakeServices {
    async fn query_status(&self, name: &str) -> Result<ServiceState, ServiceQueryError> {
        self.log.record(format!("service:{name}"));
        self.status.clone()
    }
}

/// Exclusion list that gains an entry when `add_exclusion` succeeds
pub struct FakeExclusions {
    pub excluded: Mutex<Vec<PathBuf>>,
    pub query_error: Option<PortError>,
    pub log: CallLog,
}

#[async_trait]
impl ExclusionProvider for FakeExclusions {
    async fn is_path_excluded(&self, path: &Path) -> Result<bool, PortError> {
        self.log.record("av:query");
        if let Some(error) = &self.query_error {
            return Err(error.clone());
        }
        Ok(self.excluded.lock().unwrap().iter().any(|p| p == path))
    }

    async fn add_exclusion(&self, path: &Path) -> Result<(), PortError> {
        self.log.record("av:add");
        self.excluded.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub struct FakePrivileges {
    pub elevated: bool,
    pub log: CallLog,
}

#[async_trait]
impl PrivilegeProbe for FakePrivileges {
    async fn is_elevated(&self) -> bool {
        self.log.record("privileges");
        self.elevated
    }
}

/// Builder for a full set of fakes with healthy defaults
pub struct FakeEnvironment {
    pub log: CallLog,
    pub git: Arc<FakeGit>,
    pub tooling: Arc<FakeTooling>,
    pub remote: Arc<FakeRemote>,
    pub services: Arc<FakeServices>,
    pub exclusions: Arc<FakeExclusions>,
    pub privileges: Arc<FakePrivileges>,
}

impl FakeEnvironment {
    pub fn healthy() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FakeEnvironmentBuilder {
        FakeEnvironmentBuilder::default()
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            git_config: self.git.clone(),
            git_version: self.git.clone(),
            tooling: self.tooling.clone(),
            remote_config: self.remote.clone(),
            services: self.services.clone(),
            exclusions: self.exclusions.clone(),
            privileges: self.privileges.clone(),
        }
    }
}

pub struct FakeEnvironmentBuilder {
    git_bin: Option<PathBuf>,
    hooks_dir: Option<PathBuf>,
    version_output: Result<String, PortError>,
    config: BTreeMap<String, String>,
    failing_key: Option<String>,
    policy: Option<RemoteVersionPolicy>,
    service_status: Result<ServiceState, ServiceQueryError>,
    exclusion_query_error: Option<PortError>,
    elevated: bool,
}

impl Default for FakeEnvironmentBuilder {
    fn default() -> Self {
        Self {
            git_bin: Some(PathBuf::from("/usr/bin/git")),
            hooks_dir: Some(PathBuf::from("/opt/gvfs")),
            version_output: Ok("git version 2.20.1.vfs.1.1\n".to_string()),
            config: BTreeMap::new(),
            failing_key: None,
            policy: Some(RemoteVersionPolicy::new(vec![VersionRange::new(
                ClientVersion::new(0, 0, 0, 0),
                None,
            )])),
            service_status: Ok(ServiceState::Running),
            exclusion_query_error: None,
            elevated: false,
        }
    }
}

impl FakeEnvironmentBuilder {
    pub fn without_git(mut self) -> Self {
        self.git_bin = None;
        self
    }

    pub fn without_hooks(mut self) -> Self {
        self.hooks_dir = None;
        self
    }

    pub fn version_output(mut self, output: Result<String, PortError>) -> Self {
        self.version_output = output;
        self
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_key(mut self, key: &str) -> Self {
        self.failing_key = Some(key.to_string());
        self
    }

    pub fn policy(mut self, policy: Option<RemoteVersionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn service_status(mut self, status: Result<ServiceState, ServiceQueryError>) -> Self {
        self.service_status = status;
        self
    }

    pub fn exclusion_query_error(mut self, error: PortError) -> Self {
        self.exclusion_query_error = Some(error);
        self
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    pub fn build(self) -> FakeEnvironment {
        let log = CallLog::default();
        let config = self
            .config
            .iter()
            .map(|(k, v)| (k.clone(), GitConfigSetting::new(k).with_value(v)))
            .collect();

        FakeEnvironment {
            git: Arc::new(FakeGit {
                config: Mutex::new(config),
                version_output: self.version_output,
                failing_key: self.failing_key,
                log: log.clone(),
            }),
            tooling: Arc::new(FakeTooling {
                git: self.git_bin,
                hooks: self.hooks_dir,
                log: log.clone(),
            }),
            remote: Arc::new(FakeRemote {
                policy: self.policy,
                log: log.clone(),
            }),
            services: Arc::new(FakeServices {
                status: self.service_status,
                log: log.clone(),
            }),
            exclusions: Arc::new(FakeExclusions {
                excluded: Mutex::new(Vec::new()),
                query_error: self.exclusion_query_error,
                log: log.clone(),
            }),
            privileges: Arc::new(FakePrivileges {
                elevated: self.elevated,
                log: log.clone(),
            }),
            log,
        }
    }
}
