use std::future::Future;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};
use service::{runtime, seed};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn pool_config(cfg: &configs::DatabaseConfig) -> DatabaseConfig {
    if cfg.is_in_memory() {
        // a second pooled connection would see a different, empty database
        return DatabaseConfig { url: cfg.url.clone(), ..DatabaseConfig::in_memory() };
    }
    DatabaseConfig::from(cfg)
}

/// Open the pool and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &configs::DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    runtime::ensure_env(&cfg.url).await?;
    let db = connect_with_config(&pool_config(cfg)).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");
    Ok(db)
}

/// Router over an already migrated database, optionally loading the initial peaks first.
pub async fn build_app(db: DatabaseConnection, seed_initial_peaks: bool) -> Result<Router, StartupError> {
    let state = ServerState::from_db(db);
    if seed_initial_peaks {
        let inserted = seed::load_initial_peaks(&*state.peaks).await.map_err(anyhow::Error::from)?;
        info!(inserted, "seed step finished");
    }
    Ok(routes::build_router(state, build_cors()))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = connect_and_migrate(&cfg.database).await?;
    let app = build_app(db, cfg.database.seed_initial_peaks).await?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> Result<(), StartupError> {
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    serve(cfg, ctrl_c()).await
}
