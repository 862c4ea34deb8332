use std::sync::Arc;

use api::{AppState, Config};
use domain::{catalog::Catalog, SystemClock};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::from_env();

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Catalog::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Catalog::seeded()?,
    };
    tracing::info!(
        "Catalog ready: {} doctors, {} hospitals, {} medicines",
        catalog.doctors.len(),
        catalog.hospitals.len(),
        catalog.medicines.len()
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    let state = AppState::new(config, catalog, Arc::new(SystemClock));
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
