//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::create_auth_provider;
use crate::state::AppState;
use anyhow::{Context, Result};
use cinelog_core::Config;
use cinelog_db::PgDocumentStore;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    // External auth collaborator
    let auth = create_auth_provider(&config);

    // Assemble state
    let documents = Arc::new(PgDocumentStore::new(pool));
    let state = Arc::new(AppState::build(config.clone(), storage, documents, auth));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
