//! Development asset server: reverse proxy onto the Vite dev server.
//!
//! The backend only fronts the bundler here - everything under the
//! well-known Vite prefixes is forwarded as-is and the dev server does the
//! actual module serving, transforms, and hot-module updates.

use std::io::Read;
use std::time::Duration;

use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

use crate::config::DevServerConfig;
use crate::embed::serve::{BAD_GATEWAY_HTML, BadGatewayVars};
use crate::log;

use super::response::{make_header, respond_html};

/// Path prefixes owned by the dev server: client runtime, raw module ids,
/// filesystem passthrough, project sources, and pre-bundled dependencies.
pub const PROXY_PREFIXES: [&str; 5] = ["/@vite/", "/@id/", "/@fs/", "/src/", "/node_modules/"];

/// Single files forwarded besides the prefixes.
const PROXY_FILES: [&str; 1] = ["/favicon.ico"];

/// Upstream requests that take longer than this answer 502 instead of
/// pinning a worker thread.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest request path echoed into the log. Malformed or malicious URLs
/// must not grow the log unbounded.
const MAX_LOGGED_PATH: usize = 128;

/// Reverse proxy for dev-server requests.
pub struct ProxyServer {
    upstream: String,
    client: reqwest::blocking::Client,
}

/// Fully buffered upstream answer. Buffering first means a mid-transfer
/// failure can still fall back to a clean 502.
struct Upstream {
    status: u16,
    headers: Vec<Header>,
    body: Vec<u8>,
}

impl ProxyServer {
    pub fn new(config: &DevServerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            upstream: config.upstream_base(),
            client,
        })
    }

    /// Whether this URL belongs to the dev server.
    pub fn handles(url: &str) -> bool {
        let path = url.split('?').next().unwrap_or(url);
        PROXY_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
            || PROXY_FILES.contains(&path)
    }

    /// Forward the request upstream. Transport failures stay local to the
    /// affected request: the client gets a 502 page and the server moves on.
    pub fn handle(&self, mut request: Request) -> Result<()> {
        match self.forward(&mut request) {
            Ok(upstream) => respond_upstream(request, upstream),
            Err(e) => {
                log!("proxy"; "upstream failed for {}: {e}", truncate_path(request.url()));
                let body = BAD_GATEWAY_HTML.render(&BadGatewayVars {
                    path: request.url(),
                });
                respond_html(request, 502, body)
            }
        }
    }

    fn forward(&self, request: &mut Request) -> Result<Upstream> {
        let target = format!("{}{}", self.upstream, request.url());
        let method = reqwest::Method::from_bytes(request.method().to_string().as_bytes())?;

        let mut builder = self.client.request(method, target.as_str());
        for header in request.headers() {
            let name = header.field.as_str().as_str();
            if is_hop_by_hop(name) || name.eq_ignore_ascii_case("host") {
                continue;
            }
            builder = builder.header(name, header.value.as_str());
        }

        let mut body = Vec::new();
        request.as_reader().read_to_end(&mut body)?;
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();

        let mut headers = Vec::new();
        for (name, value) in response.headers() {
            if is_hop_by_hop(name.as_str())
                || name == reqwest::header::CONTENT_LENGTH
                || name == reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN
            {
                continue;
            }
            if let Ok(header) = Header::from_bytes(name.as_str().as_bytes(), value.as_bytes()) {
                headers.push(header);
            }
        }

        let body = response.bytes()?.to_vec();
        Ok(Upstream {
            status,
            headers,
            body,
        })
    }
}

/// Relay a buffered upstream answer, adding permissive CORS so cross-origin
/// module loading from the dev server succeeds.
fn respond_upstream(request: Request, upstream: Upstream) -> Result<()> {
    let mut response =
        Response::from_data(upstream.body).with_status_code(StatusCode(upstream.status));
    for header in upstream.headers {
        response = response.with_header(header);
    }
    response = response.with_header(make_header("Access-Control-Allow-Origin", "*"));
    request.respond(response)?;
    Ok(())
}

/// Connection-scoped headers that must not cross the proxy.
fn is_hop_by_hop(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Bound a path for logging, respecting char boundaries.
fn truncate_path(path: &str) -> String {
    if path.len() <= MAX_LOGGED_PATH {
        return path.to_string();
    }
    let mut end = MAX_LOGGED_PATH;
    while !path.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &path[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_vite_prefixes() {
        assert!(ProxyServer::handles("/@vite/client"));
        assert!(ProxyServer::handles("/@id/virtual:forms"));
        assert!(ProxyServer::handles("/@fs/home/dev/forms/src/main.ts"));
        assert!(ProxyServer::handles("/src/js/pages/main.ts"));
        assert!(ProxyServer::handles("/node_modules/.vite/deps/chunk.js"));
        assert!(ProxyServer::handles("/favicon.ico"));
    }

    #[test]
    fn test_handles_ignores_query() {
        assert!(ProxyServer::handles("/src/js/pages/main.ts?t=1712"));
        assert!(ProxyServer::handles("/favicon.ico?v=2"));
    }

    #[test]
    fn test_rejects_other_paths() {
        assert!(!ProxyServer::handles("/"));
        assert!(!ProxyServer::handles("/forms/42"));
        assert!(!ProxyServer::handles("/assets/main.ab12.js"));
        // Prefix match requires the trailing slash boundary
        assert!(!ProxyServer::handles("/srcery"));
    }

    #[test]
    fn test_hop_by_hop_headers() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("transfer-encoding"));
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop("etag"));
    }

    #[test]
    fn test_truncate_path_short() {
        assert_eq!(truncate_path("/src/main.ts"), "/src/main.ts");
    }

    #[test]
    fn test_truncate_path_long() {
        let long = format!("/src/{}", "a".repeat(500));
        let truncated = truncate_path(&long);
        assert!(truncated.len() <= MAX_LOGGED_PATH + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_path_multibyte_boundary() {
        let long = format!("/src/{}", "ü".repeat(300));
        let truncated = truncate_path(&long);
        // Must not panic and must stay bounded
        assert!(truncated.len() <= MAX_LOGGED_PATH + 3);
    }
}
