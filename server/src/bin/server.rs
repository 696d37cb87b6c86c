//! hexcard server binary.
//!
//! Starts the axum web server with tracing and signal handling.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting hexcard server");

    let state = hexcard_lib::init_foundation()?;

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = hexcard_lib::server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tracing::info!(
        port = state.config().server_port,
        "Server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    server_handle.abort();
    Ok(())
}
