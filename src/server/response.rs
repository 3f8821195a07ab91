//! HTTP response helpers shared by the server strategies.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime;

/// Cache policy for content-hashed artifacts: the name encodes the content,
/// so the response can be cached forever.
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Respond with a file from the build output tree.
///
/// Every embedded response carries the immutable cache policy and a
/// sniffing-prevention header.
pub fn respond_immutable_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(200))
            .with_header(make_header("Content-Type", content_type))
            .with_header(make_header("Cache-Control", CACHE_IMMUTABLE))
            .with_header(make_header("X-Content-Type-Options", "nosniff"));
        return request.respond(response).map_err(Into::into);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let response = Response::from_data(body)
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", CACHE_IMMUTABLE))
        .with_header(make_header("X-Content-Type-Options", "nosniff"));
    request.respond(response)?;
    Ok(())
}

/// Respond with 404 Not Found.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, mime::types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(
        request,
        503,
        mime::types::PLAIN,
        b"503 Service Unavailable".to_vec(),
    )
}

/// Respond with an HTML page.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    send_body(request, status, mime::types::HTML, body.into_bytes())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

pub fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

pub fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
