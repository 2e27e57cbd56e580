// Repository trait for the persisted dashboard configuration
use crate::domain::dashboard::DashboardConfig;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request body too large (limit {limit} bytes)")]
    TooLarge { limit: usize },

    #[error("invalid dashboard config: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("config store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Load the stored configuration; `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<DashboardConfig>, StoreError>;

    /// Replace the stored configuration.
    async fn save(&self, config: &DashboardConfig) -> Result<(), StoreError>;
}
