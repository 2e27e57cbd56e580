// Dashboard service - Use cases behind the builder server
use crate::application::composer::DashboardComposer;
use crate::application::config_repository::{ConfigRepository, StoreError};
use crate::application::widget_registry::{CatalogEntry, WidgetRegistry};
use crate::domain::dashboard::{DashboardConfig, GeneratedOutput};
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ConfigRepository>,
    registry: &'static WidgetRegistry,
    max_body_bytes: usize,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn ConfigRepository>,
        registry: &'static WidgetRegistry,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            repository,
            registry,
            max_body_bytes,
        }
    }

    /// Stored configuration, or an empty 1920x1080 canvas when none exists.
    pub async fn load_config(&self) -> Result<DashboardConfig, StoreError> {
        Ok(self.repository.load().await?.unwrap_or_default())
    }

    /// Validate and persist a raw JSON body.
    pub async fn save_config(&self, body: &[u8]) -> Result<DashboardConfig, StoreError> {
        let config = self.parse_body(body)?;
        self.repository.save(&config).await?;
        tracing::info!("Saved dashboard config with {} widgets", config.widgets.len());
        Ok(config)
    }

    /// Compose the posted configuration, or the stored one for an empty body.
    pub async fn export(&self, body: &[u8]) -> Result<GeneratedOutput, StoreError> {
        let config = if body.iter().all(u8::is_ascii_whitespace) {
            self.load_config().await?
        } else {
            self.parse_body(body)?
        };
        Ok(DashboardComposer::new(self.registry).compose(&config))
    }

    pub fn catalog(&self) -> IndexMap<&'static str, Vec<CatalogEntry>> {
        self.registry.catalog()
    }

    fn parse_body(&self, body: &[u8]) -> Result<DashboardConfig, StoreError> {
        if body.len() > self.max_body_bytes {
            return Err(StoreError::TooLarge {
                limit: self.max_body_bytes,
            });
        }
        Ok(serde_json::from_slice(body)?)
    }
}
