use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::app::SharedState;

use super::{api, pages};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let max_upload = state.config().max_upload_bytes;

    Router::new()
        .route("/", get(pages::index))
        .route("/generate", post(api::cards::generate_card))
        .route("/verify", get(api::cards::verify_card))
        .route("/uploads/{filename}", get(api::cards::serve_upload))
        .route("/healthz", get(healthz_handler))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
