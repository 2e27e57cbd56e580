// Main entry point - Dependency injection and command dispatch
use anyhow::{Context, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use lobsterboard::application::config_repository::ConfigRepository;
use lobsterboard::application::dashboard_service::DashboardService;
use lobsterboard::application::openclaw_service::OpenClawService;
use lobsterboard::application::stats_service::StatsService;
use lobsterboard::application::widget_registry::builtin;
use lobsterboard::infrastructure::api_proxy::ApiProxy;
use lobsterboard::infrastructure::config::{ServerConfig, load_server_config};
use lobsterboard::infrastructure::exporter::export_dashboard;
use lobsterboard::infrastructure::file_config_store::FileConfigStore;
use lobsterboard::infrastructure::github_releases::GithubReleases;
use lobsterboard::infrastructure::system_probe::SysinfoProbe;
use lobsterboard::presentation::app_state::{BuilderState, ExportState};
use lobsterboard::presentation::router::{build_builder_router, build_export_router};

const USAGE: &str = "Usage:
  lobsterboard serve                           Run the dashboard builder
  lobsterboard export <config.json> <out-dir>  Write a static dashboard
  lobsterboard serve-export <dir>              Serve an exported dashboard with the API proxy";

#[derive(Debug, PartialEq)]
enum Command {
    Serve,
    Export { config: PathBuf, out_dir: PathBuf },
    ServeExport { dir: PathBuf },
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args {
        [] => Ok(Command::Serve),
        [cmd] if cmd == "serve" => Ok(Command::Serve),
        [cmd, config, out_dir] if cmd == "export" => Ok(Command::Export {
            config: PathBuf::from(config),
            out_dir: PathBuf::from(out_dir),
        }),
        [cmd, dir] if cmd == "serve-export" => Ok(Command::ServeExport {
            dir: PathBuf::from(dir),
        }),
        _ => bail!("{}", USAGE),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lobsterboard=info,tower_http=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    let config = load_server_config()?;

    match command {
        Command::Serve => serve(config).await,
        Command::Export { config: path, out_dir } => {
            for file in export_dashboard(builtin(), &path, &out_dir).await? {
                tracing::info!("Wrote {}", file.display());
            }
            Ok(())
        }
        Command::ServeExport { dir } => serve_export(config, dir).await,
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    // Create adapters (infrastructure layer)
    let store: Arc<dyn ConfigRepository> = Arc::new(FileConfigStore::new(&config.config_file));
    let probe = Arc::new(SysinfoProbe::new());
    let releases = Arc::new(GithubReleases::new(&config.releases_url, config.proxy_timeout())?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(store, builtin(), config.max_body_bytes);
    let stats_service = StatsService::new(probe, config.max_sse_clients);
    stats_service.start().await;
    let openclaw_service = OpenClawService::new(
        config.openclaw_home(),
        config.openclaw_package_json.clone(),
        releases,
        config.release_cache_ttl(),
    );

    let state = Arc::new(BuilderState {
        dashboard_service,
        stats_service: stats_service.clone(),
        openclaw_service,
    });
    let router = build_builder_router(state, &config.static_dir, config.max_body_bytes);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("LobsterBoard builder listening on http://{}", addr);
    tracing::info!("Config file: {}", config.config_file.display());

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            // Open stats streams must end before connections can drain
            stats_service.shutdown();
        })
        .await?;
    Ok(())
}

async fn serve_export(config: ServerConfig, dir: PathBuf) -> anyhow::Result<()> {
    if !dir.is_dir() {
        bail!("Export directory {} does not exist", dir.display());
    }

    let proxy = ApiProxy::new(
        config.backend_url(),
        config.allowed_api_paths.clone(),
        config.proxy_timeout(),
    )?;
    let router = build_export_router(Arc::new(ExportState { proxy }), &dir);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("LobsterBoard dashboard at http://{}", addr);
    tracing::info!("Proxying {} API paths to {}", config.allowed_api_paths.len(), config.backend_url());
    if !addr.ip().is_loopback() {
        tracing::warn!("Listening on {}; the API proxy is reachable from the network", addr.ip());
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("Shutdown signal received");
}
