// JSON file store for the dashboard configuration
use crate::application::config_repository::{ConfigRepository, StoreError};
use crate::domain::dashboard::DashboardConfig;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigRepository for FileConfigStore {
    async fn load(&self) -> Result<Option<DashboardConfig>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    async fn save(&self, config: &DashboardConfig) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(config)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{Canvas, WidgetInstance};

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("config.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested/config.json"));
        let config = DashboardConfig::new(
            Canvas {
                width: 1280.0,
                height: 720.0,
            },
            vec![WidgetInstance::new("c1", "clock").at(20.0, 40.0, 200.0, 120.0)],
        );

        store.save(&config).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"canvas\""));
        assert_eq!(store.load().await.unwrap(), Some(config));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        let store = FileConfigStore::new(path);
        assert!(matches!(store.load().await, Err(StoreError::Invalid(_))));
    }
}
