use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use menu_api::{build_router, AppState};
use menu_infrastructure::{DiskUploadStorage, FilePageCache, JsonSiteRepository};
use menu_shared::config::{AppConfig, StorageSettings};
use menu_shared::AppError;
use menu_shared::telemetry::init_telemetry;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    // Initialize telemetry; the guard flushes the log file on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!("Menu server starting ({})...", config.app.env);

    // Storage
    let storage = config.storage.clone();
    let repo = prepare_storage(&storage).await?;
    let cache = Arc::new(FilePageCache::new(&storage.cache_dir, repo.document_paths()));
    let uploads = Arc::new(DiskUploadStorage::new(&storage.uploads_dir));
    info!("Site data in {}", storage.data_dir.display());

    // Create App State
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let state = AppState::new(config, repo, uploads, cache)?;

    // Expired admin sessions
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired admin session(s)", purged);
            }
        }
    });

    let app = build_router(state);

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Menu server stopped");
    Ok(())
}

/// Creates the data, uploads and cache directories.
async fn prepare_storage(storage: &StorageSettings) -> anyhow::Result<Arc<JsonSiteRepository>> {
    let repo = Arc::new(JsonSiteRepository::new(&storage.data_dir));
    repo.ensure_dir().await?;
    for dir in [&storage.uploads_dir, &storage.cache_dir] {
        tokio::fs::create_dir_all(dir).await.map_err(AppError::from)?;
    }
    Ok(repo)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
