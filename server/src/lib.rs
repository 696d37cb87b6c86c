//! hexcard server library: configuration, shared state, storage, the
//! card-generation pipeline, and the axum HTTP layer.

pub mod app;
pub mod assets;
pub mod config;
pub mod pipeline;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::Context;

use app::SharedState;
use assets::CardAssets;
use config::AppConfig;
use storage::FsStore;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Read configuration, load fonts and templates, open the upload
/// directory, and assemble the shared state.
pub fn init_foundation() -> anyhow::Result<SharedState> {
    load_dotenv();

    let config = AppConfig::from_env();
    tracing::info!(
        port = config.server_port,
        upload_dir = %config.upload_dir.display(),
        "Configuration loaded"
    );

    let assets = CardAssets::load(&config).context("failed to load card assets")?;
    let store = FsStore::new(config.upload_dir.clone()).context("failed to open upload directory")?;

    Ok(SharedState::new(config, assets, Arc::new(store)))
}
