//! Storage backend setup

use anyhow::{Context, Result};
use cinelog_core::Config;
use cinelog_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the configured storage backend
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(backend = ?storage.backend_type(), "Storage backend ready");

    Ok(storage)
}
