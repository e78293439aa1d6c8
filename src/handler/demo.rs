//! Demo server routes
//!
//! Landing page, template-backed dashboard, `/go/{code}` short-link redirects
//! and two catch-all JSON handlers for `/api/*`.

use crate::config::AppState;
use crate::handler::dashboard;
use crate::handler::router::RequestContext;
use crate::http::{self, JsonStyle};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use serde_json::json;

const REDIRECT_PREFIX: &str = "/go/";
const KPI_ROUTE_MARKER: &str = "/kpis/dashboard";

pub async fn route(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let path = ctx.path;

    match *ctx.method {
        Method::GET => {
            if path == "/" {
                return http::build_html_response(landing_page().to_string());
            }
            if path == "/dashboard" {
                let html = dashboard::render(&state.config.demo.dashboard_template).await;
                return http::build_html_response(html);
            }
            if let Some(code) = path.strip_prefix(REDIRECT_PREFIX) {
                return http::build_redirect_response(resolve_short_code(state, code));
            }
            if path.starts_with("/api/") {
                return api_get(path, state);
            }
            http::build_404_response()
        }
        Method::POST if path.starts_with("/api/") => http::build_json_response(
            &json!({"success": true, "message": "Demo mode - request processed"}),
            JsonStyle::Compact,
        ),
        _ => http::build_404_response(),
    }
}

/// Exact, case-sensitive lookup with the configured fallback
pub fn resolve_short_code<'a>(state: &'a AppState, code: &str) -> &'a str {
    state
        .config
        .demo
        .redirects
        .get(code)
        .map_or(state.config.demo.default_redirect.as_str(), String::as_str)
}

fn api_get(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let body = if path.contains(KPI_ROUTE_MARKER) {
        json!({"success": true, "data": state.fixtures.kpis})
    } else {
        json!({"success": true, "data": []})
    };
    http::build_json_response(&body, JsonStyle::Compact)
}

const fn landing_page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Affiliate Boss - Demo</title>
    <style>
        body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, Arial, sans-serif; background: #111827; color: #fff; }
        nav { display: flex; justify-content: space-between; align-items: center; padding: 16px 32px; background: #1f2937; border-bottom: 2px solid #4ade80; }
        nav h1 { color: #4ade80; margin: 0; font-size: 1.5em; }
        .hero { text-align: center; padding: 80px 24px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
        .hero h1 { font-size: 3em; margin: 0 0 24px; }
        .cta { display: inline-block; padding: 16px 32px; border-radius: 8px; background: #4ade80; color: #000; font-weight: 600; text-decoration: none; box-shadow: 0 0 20px rgba(0, 255, 136, 0.3); }
        .key { display: inline-block; margin-top: 32px; padding: 12px 16px; border-radius: 8px; background: #ca8a04; color: #000; }
        .features { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 24px; padding: 64px 32px; background: #1f2937; }
        .feature { padding: 24px; border: 2px solid #4ade80; border-radius: 8px; background: #111827; }
    </style>
</head>
<body>
    <nav>
        <h1>Affiliate Boss</h1>
        <button onclick="alert('Demo mode - login not needed')">Login</button>
    </nav>
    <section class="hero">
        <h1>Affiliate Boss Demo</h1>
        <p>Test the full affiliate marketing platform with realistic demo data.</p>
        <a class="cta" href="/dashboard">Try Demo Dashboard</a>
        <div class="key"><strong>Demo API Key:</strong> <code>api_key_john_123456789</code></div>
    </section>
    <section class="features">
        <div class="feature"><h3>Affiliate Links</h3><p>Create and manage affiliate links with realistic demo data.</p></div>
        <div class="feature"><h3>Analytics Dashboard</h3><p>View performance metrics and earnings with interactive charts.</p></div>
        <div class="feature"><h3>Store Integrations</h3><p>Connect with Shopify stores and import products.</p></div>
    </section>
</body>
</html>"#
}
