//! Request routing dispatch module
//!
//! Entry point for HTTP request processing on both servers: method validation,
//! body decoding, dispatch to the server's routes, common headers and access
//! logging.

use crate::config::AppState;
use crate::handler::{demo, web};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Which of the two servers a listener belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    Demo,
    Web,
}

impl ServerKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Web => "web",
        }
    }

    pub const fn log_prefix(self) -> &'static str {
        match self {
            Self::Demo => "[DEMO]",
            Self::Web => "[WEB]",
        }
    }
}

/// Request context: everything a route needs to build its response
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    /// Decoded JSON object body, `{}` when absent or malformed
    pub body: &'a Value,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    kind: ServerKind,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = state.access_log().then(|| access_entry(&req, peer_addr, kind));

    let (parts, body) = req.into_parts();
    let mut response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => {
            let max_body_size = state.config.http.max_body_size;
            // Oversized bodies decode to `{}` like any other unusable body
            let body = if parts.method != Method::POST
                || http::declared_length_exceeds(&parts.headers, max_body_size)
            {
                http::empty_object()
            } else {
                http::read_json_body(body, max_body_size).await
            };
            let ctx = RequestContext {
                method: &parts.method,
                path: parts.uri.path(),
                body: &body,
            };
            route_request(&ctx, &state, kind).await
        }
    };

    http::apply_common_headers(&mut response, &state.config.http.server_name);

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| usize::try_from(response.body().size_hint().lower()).unwrap_or(0));
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch an already decoded request to the server's routes
pub async fn route_request(
    ctx: &RequestContext<'_>,
    state: &AppState,
    kind: ServerKind,
) -> Response<Full<Bytes>> {
    match kind {
        ServerKind::Demo => demo::route(ctx, state).await,
        ServerKind::Web => web::route(ctx, state).await,
    }
}

/// Answer OPTIONS and unsupported methods before any routing happens
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::POST => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not implemented: {method}"));
            Some(http::build_501_response())
        }
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr, kind: ServerKind) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        kind.label(),
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    pub fn test_state() -> Arc<AppState> {
        let mut cfg = Config::load_from("does-not-exist/affiliate").unwrap();
        cfg.logging.access_log = false;
        Arc::new(AppState::new(&cfg))
    }

    pub async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn send(
        kind: ServerKind,
        method: Method,
        uri: &str,
        body: &str,
    ) -> Response<Full<Bytes>> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-length", body.len())
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        handle_request(req, peer, test_state(), kind).await.unwrap()
    }

    #[tokio::test]
    async fn test_options_any_path_both_servers() {
        for kind in [ServerKind::Demo, ServerKind::Web] {
            for path in ["/", "/api/links", "/nowhere/at/all"] {
                let response = send(kind, Method::OPTIONS, path, "").await;
                assert_eq!(response.status(), 200);
                let headers = response.headers();
                assert_eq!(headers["access-control-allow-origin"], "*");
                assert!(headers.contains_key("access-control-allow-methods"));
                assert!(headers.contains_key("access-control-allow-headers"));
                let bytes = response.into_body().collect().await.unwrap().to_bytes();
                assert!(bytes.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_unsupported_method_is_501() {
        let response = send(ServerKind::Web, Method::DELETE, "/api/links", "").await;
        assert_eq!(response.status(), 501);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_malformed_json_never_errors() {
        let paths = [
            (ServerKind::Demo, "/api/anything"),
            (ServerKind::Web, "/api/links"),
            (ServerKind::Web, "/api/tools/content"),
            (ServerKind::Web, "/api/health"),
            (ServerKind::Web, "/api/unknown/route"),
        ];
        for (kind, path) in paths {
            for body in ["{broken", "[1,2,3]", "null", "\u{0}"] {
                let response = send(kind, Method::POST, path, body).await;
                assert_eq!(response.status(), 200, "{path} with {body:?}");
                let json = body_json(response).await;
                assert_eq!(json["success"], true);
            }
        }
    }

    #[tokio::test]
    async fn test_oversized_body_decodes_to_empty_object() {
        let oversized = "x".repeat(1_100_000);
        let response = send(ServerKind::Web, Method::POST, "/api/links", &oversized).await;
        assert_eq!(response.status(), 200);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "New Link");

        // Declared length over the limit, body never read
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/anything")
            .header("content-length", "999999999")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let response = handle_request(req, peer, test_state(), ServerKind::Demo)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn test_undeclared_oversized_body_is_capped() {
        let oversized = format!(r#"{{"name":"{}"}}"#, "y".repeat(1_100_000));
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/links")
            .body(Full::new(Bytes::from(oversized)))
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let response = handle_request(req, peer, test_state(), ServerKind::Web)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(response).await["data"]["name"], "New Link");
    }

    #[test]
    fn test_server_kind_labels() {
        assert_eq!(ServerKind::Demo.label(), "demo");
        assert_eq!(ServerKind::Web.log_prefix(), "[WEB]");
    }
}
