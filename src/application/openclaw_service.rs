// OpenClaw service - local auth profile status and cached release checks
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Error)]
pub enum OpenClawError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Release(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthStatus {
    pub status: &'static str,
    /// `Monthly` for a subscription token, `API` otherwise.
    pub mode: &'static str,
    pub primary: String,
}

/// The fields of a published release that the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LatestRelease {
    pub tag_name: Option<String>,
    pub html_url: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub status: &'static str,
    pub current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest(&self) -> Result<LatestRelease, OpenClawError>;
}

/// Resolve the primary Anthropic profile and whether it is a subscription token.
pub fn auth_status(config: &Value, profiles: &Value) -> AuthStatus {
    let primary_id = config
        .pointer("/auth/order/anthropic/0")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .unwrap_or("default");
    let primary = format!("anthropic:{}", primary_id);

    let profile_type = profiles
        .get("profiles")
        .and_then(|p| p.get(&primary))
        .and_then(|p| p.get("type"))
        .and_then(Value::as_str);
    let mode = if profile_type == Some("token") { "Monthly" } else { "API" };

    AuthStatus {
        status: "ok",
        mode,
        primary,
    }
}

async fn read_json(path: &Path) -> Result<Value, OpenClawError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| OpenClawError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| OpenClawError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Clone)]
pub struct OpenClawService {
    home: PathBuf,
    package_json: Option<PathBuf>,
    releases: Arc<dyn ReleaseSource>,
    cache: Arc<RwLock<Option<(Instant, ReleaseInfo)>>>,
    cache_ttl: Duration,
}

impl OpenClawService {
    pub fn new(
        home: PathBuf,
        package_json: Option<PathBuf>,
        releases: Arc<dyn ReleaseSource>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            home,
            package_json,
            releases,
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("openclaw.json")
    }

    pub fn auth_profiles_path(&self) -> PathBuf {
        self.home
            .join("agents")
            .join("main")
            .join("agent")
            .join("auth-profiles.json")
    }

    /// Read both files on every call; edits show up without a restart.
    pub async fn auth_status(&self) -> Result<AuthStatus, OpenClawError> {
        let config = read_json(&self.config_path()).await?;
        let profiles = read_json(&self.auth_profiles_path()).await?;
        Ok(auth_status(&config, &profiles))
    }

    /// Installed OpenClaw version, or `unknown` when it cannot be determined.
    pub async fn current_version(&self) -> String {
        let Some(path) = &self.package_json else {
            return UNKNOWN_VERSION.to_string();
        };
        match read_json(path).await {
            Ok(package) => package
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_VERSION)
                .to_string(),
            Err(e) => {
                tracing::debug!("OpenClaw version lookup failed: {}", e);
                UNKNOWN_VERSION.to_string()
            }
        }
    }

    /// Latest release alongside the installed version. Successful lookups are
    /// cached for the configured TTL; failures are not cached.
    pub async fn releases(&self) -> Result<ReleaseInfo, OpenClawError> {
        if let Some((fetched_at, info)) = self.cache.read().await.as_ref() {
            if fetched_at.elapsed() < self.cache_ttl {
                return Ok(info.clone());
            }
        }

        let current = self.current_version().await;
        let latest = self.releases.latest().await?;
        let info = ReleaseInfo {
            status: "ok",
            current,
            latest: latest.tag_name,
            latest_url: latest.html_url,
            published_at: latest.published_at,
        };
        tracing::info!(
            "Fetched OpenClaw release info (latest {})",
            info.latest.as_deref().unwrap_or("none")
        );

        *self.cache.write().await = Some((Instant::now(), info.clone()));
        Ok(info)
    }
}
