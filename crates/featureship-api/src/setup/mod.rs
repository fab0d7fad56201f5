//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so the integration
//! tests can assemble the same router against their own database.

pub mod database;
pub mod routes;
pub mod server;

use anyhow::{Context, Result};
use featureship_core::Config;

use crate::state::AppState;

/// Initialize the entire application: telemetry, database, state, routes.
pub async fn initialize_app(config: Config) -> Result<(AppState, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let state = AppState::new(config.clone(), pool);

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
