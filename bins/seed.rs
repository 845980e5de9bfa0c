//! Load the bundled initial peaks into the configured database.

use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = configs::AppConfig::load_or_env()?;
    let db = server::startup::connect_and_migrate(&cfg.database).await?;

    let state = server::routes::ServerState::from_db(db);
    let inserted = service::seed::load_initial_peaks(&*state.peaks).await?;
    let total = state.peaks.count().await?;
    info!(service = "seed", event = "done", inserted, total, "seeding finished");
    Ok(())
}
