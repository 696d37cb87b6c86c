//! Embedded HTML pages and flash-message rendering.
//!
//! Flash messages travel in the `flash` query parameter of a redirect
//! back to the form and are HTML-escaped into the page.

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Redirect, Response};
use rust_embed::Embed;
use serde::Deserialize;

#[derive(Embed)]
#[folder = "static/"]
struct Pages;

#[derive(Debug, Deserialize, Default)]
pub struct IndexParams {
    #[serde(default)]
    pub flash: String,
}

/// GET / – the submission form, with an optional flash message.
pub async fn index(Query(params): Query<IndexParams>) -> Response {
    Html(render_index(&params.flash)).into_response()
}

/// Render the form page, injecting the flash block when present.
pub fn render_index(flash: &str) -> String {
    let block = if flash.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="flash">{}</p>"#, escape_html(flash))
    };
    page("index.html").replace("<!--flash-->", &block)
}

/// Redirect to the form carrying a flash message.
pub fn flash_redirect(message: &str) -> Redirect {
    let query = serde_urlencoded::to_string([("flash", message)]).unwrap_or_default();
    Redirect::to(&format!("/?{query}"))
}

pub fn render_card_page(front_url: &str, back_url: &str) -> String {
    page("id_card.html")
        .replace("{{front_image}}", &escape_html(front_url))
        .replace("{{back_image}}", &escape_html(back_url))
}

pub fn render_verify_page(reg_no: &str, name: &str) -> String {
    page("verify.html")
        .replace("{{reg_no}}", &escape_html(reg_no))
        .replace("{{name}}", &escape_html(name))
}

pub fn render_verify_error(message: &str) -> String {
    page("verify_error.html").replace("{{error}}", &escape_html(message))
}

fn page(name: &str) -> String {
    Pages::get(name)
        .map(|f| String::from_utf8_lossy(&f.data).into_owned())
        .unwrap_or_default()
}

/// Minimal HTML escaping for interpolated values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_without_flash_has_no_flash_block() {
        let html = render_index("");
        assert!(!html.contains(r#"class="flash""#));
        assert!(html.contains("/generate"));
    }

    #[test]
    fn index_with_flash_escapes_the_message() {
        let html = render_index("<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn card_page_embeds_both_image_urls() {
        let html = render_card_page("/uploads/front_a.png", "/uploads/back_a.png");
        assert!(html.contains("/uploads/front_a.png"));
        assert!(html.contains("/uploads/back_a.png"));
    }

    #[test]
    fn verify_page_shows_id_and_name() {
        let html = render_verify_page("REG123", "Jane Doe");
        assert!(html.contains("REG123"));
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("Verified"));
    }

    #[test]
    fn flash_redirect_encodes_the_message() {
        let redirect = flash_redirect("Invalid file type.");
        let response = redirect.into_response();
        let location = response
            .headers()
            .get(axum::http::header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with("/?flash="));
        assert!(!location.contains(' '));
    }

    #[test]
    fn escape_html_handles_all_special_characters() {
        assert_eq!(escape_html(r#"a&b<c>d"e"#), "a&amp;b&lt;c&gt;d&quot;e");
    }
}
