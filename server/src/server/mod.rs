pub mod api;
pub mod pages;
pub mod router;

use anyhow::Result;

use crate::app::SharedState;

/// Start the axum HTTP server.
pub async fn start_server(state: SharedState) -> Result<()> {
    let port = state.config().server_port;
    let app = router::create_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("hexcard server listening on http://{addr}");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
