// Server settings - config/server.toml layered with LOBSTERBOARD_* variables
use crate::infrastructure::github_releases::DEFAULT_RELEASES_URL;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_PATH: &str = "config/server";
const ENV_PREFIX: &str = "LOBSTERBOARD";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where the builder persists the dashboard configuration.
    pub config_file: PathBuf,
    pub static_dir: PathBuf,
    pub backend_url: String,
    pub proxy_timeout_secs: u64,
    pub allowed_api_paths: Vec<String>,
    pub max_body_bytes: usize,
    pub max_sse_clients: usize,
    /// OpenClaw state directory; `~/.openclaw` when unset.
    pub openclaw_home: Option<PathBuf>,
    /// The installed OpenClaw `package.json`, for the current version.
    pub openclaw_package_json: Option<PathBuf>,
    pub releases_url: String,
    pub release_cache_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            config_file: PathBuf::from("config.json"),
            static_dir: PathBuf::from("."),
            backend_url: "http://localhost:18789".to_string(),
            proxy_timeout_secs: 10,
            allowed_api_paths: [
                "/api/status",
                "/api/health",
                "/api/activity",
                "/api/cron",
                "/api/logs",
                "/api/sessions",
                "/api/usage/tokens",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            max_body_bytes: 1024 * 1024,
            max_sse_clients: 10,
            openclaw_home: None,
            openclaw_package_json: None,
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            release_cache_secs: 3600,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn backend_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }

    pub fn release_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.release_cache_secs)
    }

    pub fn openclaw_home(&self) -> PathBuf {
        if let Some(home) = &self.openclaw_home {
            return home.clone();
        }
        let user_home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_default();
        user_home.join(".openclaw")
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    load_from(Path::new(CONFIG_PATH), true)
}

fn load_from(path: &Path, with_env: bool) -> anyhow::Result<ServerConfig> {
    let name = path.to_string_lossy();
    let mut builder = config::Config::builder()
        .add_source(config::File::with_name(&name).required(false));

    if with_env {
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_api_paths"),
        );
    }

    let settings = builder.build().context("Failed to read server settings")?;
    Ok(settings.try_deserialize()?)
}
