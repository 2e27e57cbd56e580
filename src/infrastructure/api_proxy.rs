// Whitelisted proxy from the export server to the OpenClaw gateway
use bytes::Bytes;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("API endpoint not allowed")]
    NotAllowed,

    #[error("Failed to reach backend service")]
    Upstream(#[source] reqwest::Error),
}

/// Upstream reply, relayed without interpretation.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct ApiProxy {
    client: reqwest::Client,
    backend_url: String,
    allowed_paths: Vec<String>,
}

/// Eight lowercase hex characters.
pub fn request_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

impl ApiProxy {
    pub fn new(
        backend_url: &str,
        allowed_paths: Vec<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
            allowed_paths,
        })
    }

    /// Exact match only; `/api/status/extra` is not covered by `/api/status`.
    pub fn is_allowed(&self, path: &str) -> bool {
        self.allowed_paths.iter().any(|allowed| allowed == path)
    }

    pub fn target_url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }

    pub async fn forward(&self, path: &str, request_id: &str) -> Result<ProxiedResponse, ProxyError> {
        if !self.is_allowed(path) {
            tracing::warn!(request_id, path, "Blocked API path");
            return Err(ProxyError::NotAllowed);
        }

        let url = self.target_url(path);
        let started = Instant::now();
        let result = self.fetch(&url).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::info!(
                request_id,
                target = %url,
                status = response.status,
                elapsed_ms,
                "PROXY {}",
                path
            ),
            Err(e) => tracing::error!(
                request_id,
                target = %url,
                error = %e,
                elapsed_ms,
                "Proxy failed: {}",
                path
            ),
        }
        result.map_err(ProxyError::Upstream)
    }

    async fn fetch(&self, url: &str) -> Result<ProxiedResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = response.bytes().await?;

        Ok(ProxiedResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(backend: &str) -> ApiProxy {
        ApiProxy::new(
            backend,
            vec!["/api/status".to_string(), "/api/usage/tokens".to_string()],
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[test]
    fn test_whitelist_is_exact() {
        let proxy = proxy("http://localhost:18789");
        assert!(proxy.is_allowed("/api/status"));
        assert!(proxy.is_allowed("/api/usage/tokens"));
        assert!(!proxy.is_allowed("/api/status/"));
        assert!(!proxy.is_allowed("/api/status/../secrets"));
        assert!(!proxy.is_allowed("/api/usage"));
        assert!(!proxy.is_allowed("/API/STATUS"));
    }

    #[test]
    fn test_target_url_trims_backend_slash() {
        let proxy = proxy("http://gateway:18789/");
        assert_eq!(proxy.target_url("/api/status"), "http://gateway:18789/api/status");
    }

    #[test]
    fn test_request_id_format() {
        let id = request_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_blocked_path_never_reaches_backend() {
        let proxy = proxy("http://127.0.0.1:9");
        assert!(matches!(
            proxy.forward("/api/secrets", "abcd1234").await,
            Err(ProxyError::NotAllowed)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_upstream_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let proxy = proxy(&format!("http://127.0.0.1:{}", port));
        let err = proxy.forward("/api/status", "abcd1234").await.unwrap_err();
        assert!(matches!(err, ProxyError::Upstream(_)));
        assert_eq!(err.to_string(), "Failed to reach backend service");
    }
}
