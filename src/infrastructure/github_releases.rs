// GitHub "latest release" lookup for the OpenClaw repository
use crate::application::openclaw_service::{LatestRelease, OpenClawError, ReleaseSource};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/openclaw/openclaw/releases/latest";

const USER_AGENT: &str = concat!("lobsterboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: reqwest::Client,
    url: String,
}

impl GithubReleases {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        // The GitHub API rejects requests without a User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl ReleaseSource for GithubReleases {
    async fn latest(&self) -> Result<LatestRelease, OpenClawError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                tracing::warn!("Release lookup against {} failed: {}", self.url, e);
                OpenClawError::Release(e.to_string())
            })?;

        response
            .json::<LatestRelease>()
            .await
            .map_err(|e| OpenClawError::Release(e.to_string()))
    }
}
