// Writes a composed dashboard to an output directory
use crate::application::composer::{DashboardComposer, SCRIPT_PATH};
use crate::application::stylesheet::STYLESHEET_PATH;
use crate::application::widget_registry::WidgetRegistry;
use crate::domain::dashboard::{DashboardConfig, GeneratedOutput};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const INDEX_PATH: &str = "index.html";
pub const README_PATH: &str = "README.md";

pub async fn read_config(path: &Path) -> Result<DashboardConfig> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("Invalid dashboard config in {}", path.display()))
}

/// Write the four generated files under `out_dir`, returning their paths.
pub async fn write_output(output: &GeneratedOutput, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let files = [
        (INDEX_PATH, &output.html),
        (STYLESHEET_PATH, &output.css),
        (SCRIPT_PATH, &output.js),
        (README_PATH, &output.readme),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (relative, contents) in files {
        let path = out_dir.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub async fn export_dashboard(
    registry: &WidgetRegistry,
    config_path: &Path,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let config = read_config(config_path).await?;
    let output = DashboardComposer::new(registry).compose(&config);
    let written = write_output(&output, out_dir).await?;
    tracing::info!(
        "Exported {} widgets to {}",
        config.widgets.len(),
        out_dir.display()
    );
    Ok(written)
}
