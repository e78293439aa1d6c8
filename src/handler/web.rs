//! Web server routes
//!
//! Static files from the public root, plus a fixed set of `/api/*` fixture
//! endpoints. Unknown API paths get a success-shaped acknowledgement.

use crate::config::AppState;
use crate::fixtures::{NewLink, FIXED_TIMESTAMP};
use crate::handler::content::{self, ContentRequest};
use crate::handler::router::RequestContext;
use crate::handler::static_files;
use crate::http::{self, JsonStyle};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use serde_json::{json, Value};

const API_VERSION: &str = "4.0.0";

pub async fn route(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    if ctx.path.starts_with("/api/") {
        return http::build_json_response(&api_response(ctx, state), JsonStyle::Pretty);
    }

    match *ctx.method {
        Method::GET => static_files::serve_public(&state.config.web.public_dir, ctx.path).await,
        _ => http::build_404_response(),
    }
}

/// JSON body for an `/api/*` request
fn api_response(ctx: &RequestContext<'_>, state: &AppState) -> Value {
    let fixtures = &state.fixtures;
    let is_post = *ctx.method == Method::POST;

    match ctx.path {
        "/api/health" => json!({
            "success": true,
            "message": "Affiliate Boss API is running!",
            "timestamp": FIXED_TIMESTAMP,
            "version": API_VERSION,
        }),
        "/api/dashboard" => json!({"success": true, "data": fixtures.dashboard}),
        "/api/analytics" => json!({"success": true, "data": fixtures.analytics}),
        "/api/commissions" => json!({"success": true, "data": fixtures.commissions}),
        "/api/links" if is_post => json!({"success": true, "data": NewLink::from_body(ctx.body)}),
        "/api/links" => json!({"success": true, "data": fixtures.links}),
        "/api/tools/content" if is_post => json!({
            "success": true,
            "data": content::generate(ContentRequest::from_body(ctx.body)),
        }),
        path => json!({
            "success": true,
            "message": format!("API endpoint {path} (demo mode)"),
            "timestamp": FIXED_TIMESTAMP,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::router::tests::{body_json, send};
    use crate::handler::router::ServerKind;

    async fn call(method: Method, path: &str, body: &str) -> Value {
        let response = send(ServerKind::Web, method, path, body).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let json = call(Method::GET, "/api/health", "").await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Affiliate Boss API is running!");
        assert_eq!(json["version"], "4.0.0");
    }

    #[tokio::test]
    async fn test_fixed_routes_ignore_method() {
        for path in ["/api/health", "/api/dashboard", "/api/analytics", "/api/commissions"] {
            let get = call(Method::GET, path, "").await;
            let post = call(Method::POST, path, r#"{"anything": true}"#).await;
            assert_eq!(get, post, "{path}");
        }
    }

    #[tokio::test]
    async fn test_dashboard_and_analytics_shapes() {
        let dashboard = call(Method::GET, "/api/dashboard", "").await;
        assert_eq!(dashboard["data"]["stats"]["total_earnings"], 15420.5);
        assert_eq!(dashboard["data"]["recent_activity"][0]["type"], "commission");

        let analytics = call(Method::GET, "/api/analytics", "").await;
        assert_eq!(analytics["data"]["revenue_trend"][4]["revenue"], 1450);
        assert_eq!(analytics["data"]["top_products"][2]["name"], "Fitness Tracker");
    }

    #[tokio::test]
    async fn test_commissions() {
        let json = call(Method::GET, "/api/commissions", "").await;
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["rate"], "15%");
        assert_eq!(data[2]["status"], "paid");
    }

    #[tokio::test]
    async fn test_list_links() {
        let json = call(Method::GET, "/api/links", "").await;
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["short_url"], "https://aff.ly/FAS123");
        assert_eq!(data[1]["earnings"], 1120.0);
    }

    #[tokio::test]
    async fn test_create_link_echoes_fields() {
        let json = call(
            Method::POST,
            "/api/links",
            r#"{"name":"X","original_url":"https://y.com"}"#,
        )
        .await;
        assert_eq!(json["data"]["name"], "X");
        assert_eq!(json["data"]["original_url"], "https://y.com");
        assert_eq!(json["data"]["id"], 12345);
        assert_eq!(json["data"]["short_url"], "https://aff.ly/ABC123");
        assert_eq!(json["data"]["created_at"], FIXED_TIMESTAMP);
    }

    #[tokio::test]
    async fn test_create_link_with_malformed_body_uses_defaults() {
        let json = call(Method::POST, "/api/links", "{oops").await;
        assert_eq!(json["data"]["name"], "New Link");
        assert_eq!(json["data"]["original_url"], "https://example.com");
    }

    #[tokio::test]
    async fn test_content_generation() {
        let json = call(
            Method::POST,
            "/api/tools/content",
            r#"{"content_type":"product_description","product_name":"Widget","keywords":"testing"}"#,
        )
        .await;
        let content = json["data"]["content"].as_str().unwrap();
        assert!(content.contains("Widget"));
        assert!(content.contains("testing"));
        assert_eq!(json["data"]["content_type"], "product_description");
    }

    #[tokio::test]
    async fn test_explicit_nulls_are_echoed() {
        let json = call(
            Method::POST,
            "/api/tools/content",
            r#"{"content_type":null,"product_name":null}"#,
        )
        .await;
        assert_eq!(json["data"]["content"], "Generated content for null");
        assert!(json["data"]["content_type"].is_null());

        let json = call(Method::POST, "/api/links", r#"{"name":null}"#).await;
        assert!(json["data"]["name"].is_null());
        assert_eq!(json["data"]["original_url"], "https://example.com");
    }

    #[tokio::test]
    async fn test_content_get_is_not_a_content_route() {
        let json = call(Method::GET, "/api/tools/content", "").await;
        assert!(json.get("data").is_none());
        assert_eq!(json["message"], "API endpoint /api/tools/content (demo mode)");
    }

    #[tokio::test]
    async fn test_unknown_api_fallback() {
        for method in [Method::GET, Method::POST] {
            let json = call(method, "/api/payouts/queue", "").await;
            assert_eq!(json["success"], true);
            assert_eq!(json["message"], "API endpoint /api/payouts/queue (demo mode)");
            assert_eq!(json["timestamp"], FIXED_TIMESTAMP);
        }
    }

    #[tokio::test]
    async fn test_pretty_printed() {
        let response = send(ServerKind::Web, Method::GET, "/api/health", "").await;
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert!(bytes.starts_with(b"{\n  \""));
    }

    #[tokio::test]
    async fn test_static_index_from_bundled_public_dir() {
        let response = send(ServerKind::Web, Method::GET, "/", "").await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_static_misses_and_traversal() {
        for path in [
            "/missing.png",
            "/../Cargo.toml",
            "/%2e%2e/Cargo.toml",
            "/..%2fCargo.toml",
            "/%2e%2e%2fCargo.toml",
            "/css",
        ] {
            let response = send(ServerKind::Web, Method::GET, path, "").await;
            assert_eq!(response.status(), 404, "{path}");
        }
    }

    #[tokio::test]
    async fn test_post_outside_api_is_404() {
        let response = send(ServerKind::Web, Method::POST, "/index.html", "{}").await;
        assert_eq!(response.status(), 404);
    }
}
