// Infrastructure layer - External dependencies and adapters
pub mod api_proxy;
pub mod config;
pub mod exporter;
pub mod file_config_store;
pub mod github_releases;
pub mod http_response;
pub mod system_probe;
