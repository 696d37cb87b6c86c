//! Card generation, verification, and upload serving.

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::error;

use crate::app::SharedState;
use crate::pipeline::{self, PipelineError, Submission};

use super::super::pages;

/// POST /generate – run the card pipeline for one multipart submission.
pub async fn generate_card(State(state): State<SharedState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match pipeline::generate_card(state.config(), state.assets(), state.store(), submission) {
        Ok(urls) => Html(pages::render_card_page(&urls.front, &urls.back)).into_response(),
        Err(PipelineError::Invalid(msg)) => pages::flash_redirect(&msg).into_response(),
        Err(e) => {
            error!("Error during card generation: {e}");
            pages::flash_redirect(
                "An error occurred while generating the card. Please try again.",
            )
            .into_response()
        }
    }
}

/// Collect the multipart fields into a `Submission`.
///
/// Oversized bodies surface here as read errors carrying a 413 status.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, Response> {
    let mut submission = Submission::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(body_error_response(e)),
        };

        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "photo" => {
                submission.photo_filename = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => submission.photo = bytes.to_vec(),
                    Err(e) => return Err(body_error_response(e)),
                }
            }
            "name" | "reg_no" | "email" | "phone" => {
                let value = match field.text().await {
                    Ok(text) => text,
                    Err(e) => return Err(body_error_response(e)),
                };
                match field_name.as_str() {
                    "name" => submission.name = value,
                    "reg_no" => submission.reg_no = value,
                    "email" => submission.email = value,
                    _ => submission.phone = value,
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn body_error_response(e: MultipartError) -> Response {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Html(pages::render_index("File is too large. Maximum size is 4 MB.")),
        )
            .into_response();
    }
    pages::flash_redirect(&e.to_string()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// GET /verify – presentational verification page.
///
/// No lookup against generated cards is performed; the page echoes the
/// id and name from the QR-encoded URL.
pub async fn verify_card(Query(params): Query<VerifyParams>) -> Response {
    if params.id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Html(pages::render_verify_error("Invalid verification code")),
        )
            .into_response();
    }

    let name = params.name.replace('+', " ");
    Html(pages::render_verify_page(&params.id, &name)).into_response()
}

/// GET /uploads/{filename} – serve a generated image by exact name.
pub async fn serve_upload(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Response {
    // Exact-name lookup only; no nested paths.
    if filename.contains('/') || filename.contains("..") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let data = match state.store().get(&filename) {
        Ok(data) => data,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    match Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(data))
    {
        Ok(resp) => resp,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::sync::Arc;

    use crate::assets::CardAssets;
    use crate::config::AppConfig;
    use crate::storage::{BlobStore, MemoryStore};

    fn state_with_store(store: Arc<MemoryStore>) -> SharedState {
        let config = AppConfig::default();
        let assets = CardAssets::load(&config).unwrap();
        SharedState::new(config, assets, store)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn verify_without_id_is_a_400_error_page() {
        let response = verify_card(Query(VerifyParams {
            id: String::new(),
            name: "Jane".into(),
        }))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("Invalid verification code"));
    }

    #[tokio::test]
    async fn verify_restores_plus_signs_to_spaces() {
        let response = verify_card(Query(VerifyParams {
            id: "REG123".into(),
            name: "Jane+Doe".into(),
        }))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("REG123"));
        assert!(body.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn serve_upload_returns_stored_png() {
        let store = Arc::new(MemoryStore::new());
        store.put("front_abc.png", b"png-bytes").unwrap();
        let state = state_with_store(store);

        let response = serve_upload(State(state), Path("front_abc.png".into())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"png-bytes");
    }

    #[tokio::test]
    async fn serve_upload_rejects_unknown_and_traversal_names() {
        let state = state_with_store(Arc::new(MemoryStore::new()));

        let missing = serve_upload(State(state.clone()), Path("nope.png".into())).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let traversal = serve_upload(State(state), Path("../secret".into())).await;
        assert_eq!(traversal.status(), StatusCode::NOT_FOUND);
    }
}
