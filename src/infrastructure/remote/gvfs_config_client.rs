use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::application::ports::RemoteConfigClient;
use crate::domain::entities::remote_version_policy::RemoteVersionPolicy;

/// Path of the policy endpoint, relative to the repository URL.
pub const GVFS_CONFIG_ENDPOINT: &str = "gvfs/config";

/// リモート設定取得のエラー
#[derive(Debug, Error)]
pub enum RemoteConfigError {
    #[error("Invalid repository url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Fetches `<repo_url>/gvfs/config` over HTTP.
///
/// Every call is a fresh request with no caching and no retries.
#[derive(Debug, Clone)]
pub struct GvfsConfigClient {
    http_client: reqwest::Client,
}

impl GvfsConfigClient {
    pub fn new(timeout_seconds: u64) -> Result<Self, RemoteConfigError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("gvfs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http_client })
    }

    /// Join the endpoint onto `repo_url`, keeping the repository path.
    pub fn config_url(repo_url: &str) -> Result<Url, RemoteConfigError> {
        let invalid = |source| RemoteConfigError::InvalidUrl {
            url: repo_url.to_string(),
            source,
        };
        let mut base = Url::parse(repo_url).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(GVFS_CONFIG_ENDPOINT).map_err(invalid)
    }

    pub async fn fetch(&self, repo_url: &str) -> Result<RemoteVersionPolicy, RemoteConfigError> {
        let url = Self::config_url(repo_url)?;
        tracing::debug!(url = %url, "querying gvfs/config");

        let response = self.http_client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteConfigError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.json::<RemoteVersionPolicy>().await?)
    }
}

#[async_trait]
impl RemoteConfigClient for GvfsConfigClient {
    async fn query_config(&self, repo_url: &str) -> Option<RemoteVersionPolicy> {
        match self.fetch(repo_url).await {
            Ok(policy) => Some(policy),
            Err(e) => {
                tracing::warn!(error = %e, "unable to query gvfs/config");
                None
            }
        }
    }
}
