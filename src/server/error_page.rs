use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::listing::ListingError;

/// Produces the response sent when a listing fails and the configured policy
/// is to answer directly.
pub trait ErrorResponder: Send + Sync {
    fn respond(&self, status: StatusCode, error: &ListingError) -> Response;
}

/// Default responder: an opaque page naming only the status.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusPage;

impl ErrorResponder for StatusPage {
    fn respond(&self, status: StatusCode, _error: &ListingError) -> Response {
        let reason = status.canonical_reason().unwrap_or("Error");
        let title = format!("{} {}", status.as_u16(), reason);
        let body = html! {
            h1 class="error-title" { (title) }
        };
        html_response(status, &title, body)
    }
}

/// Page for paths that exist neither as a file nor as a directory.
pub fn not_found_page(uri_path: &str) -> Response {
    let body = html! {
        h1 class="error-title" { "File Not Found" }
        p class="error-message" {
            "The path " code { (uri_path) } " does not exist."
        }
    };
    html_response(StatusCode::NOT_FOUND, "File Not Found", body)
}

fn html_response(status: StatusCode, title: &str, body: Markup) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(ERROR_CSS)) }
            }
            body {
                div class="error-card" { (body) }
            }
        }
    };

    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        page.into_string(),
    )
        .into_response()
}

const ERROR_CSS: &str = "\
body{\
    font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',Arial,sans-serif;\
    background:#FFF8F3;color:#3D3D3D;\
}\
.error-card{\
    background:#FFFFFF;border-radius:12px;border:1px solid #F0E6DD;\
    padding:36px;max-width:700px;margin:40px auto;text-align:center;\
}\
.error-title{color:#E8853A;font-size:1.6em;margin-bottom:16px;font-weight:700}\
.error-message{font-size:1.05em}\
";
