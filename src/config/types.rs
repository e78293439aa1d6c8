// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub demo: DemoConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Process-wide server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface both servers bind to
    pub host: String,
    pub workers: Option<usize>,
}

/// Demo server (landing page, dashboard, short-link redirects)
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    pub enabled: bool,
    pub port: u16,
    /// Resource whose source text embeds the dashboard markup
    pub dashboard_template: String,
    /// Fallback target for unknown short codes
    pub default_redirect: String,
    /// Short code -> destination URL
    #[serde(default = "default_redirects")]
    pub redirects: HashMap<String, String>,
}

/// Web server (static files and the `/api/*` fixtures)
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub enabled: bool,
    pub port: u16,
    pub public_dir: String,
    /// Kill whatever already holds the port before binding
    pub free_port_on_start: bool,
}

fn default_redirects() -> HashMap<String, String> {
    [
        ("mbp001", "https://apple.com/macbook-pro"),
        ("tesla02", "https://tesla.com/models"),
        ("ip15pm", "https://apple.com/iphone-15-pro"),
    ]
    .into_iter()
    .map(|(code, url)| (code.to_string(), url.to_string()))
    .collect()
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}
