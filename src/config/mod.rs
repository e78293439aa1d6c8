// Configuration module entry point
// Loads layered configuration and builds the immutable runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable prefix, e.g. `AFFILIATE_WEB__PORT=3001`
const ENV_PREFIX: &str = "AFFILIATE";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("demo.enabled", true)?
            .set_default("demo.port", 8080)?
            .set_default("demo.dashboard_template", "templates/dashboard.js")?
            .set_default("demo.default_redirect", "https://example.com")?
            .set_default("web.enabled", true)?
            .set_default("web.port", 3000)?
            .set_default("web.public_dir", "public")?
            .set_default("web.free_port_on_start", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "AffiliateBoss-Demo/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_demo_socket_addr(&self) -> Result<SocketAddr, String> {
        socket_addr(&self.server.host, self.demo.port)
            .map_err(|e| format!("Invalid demo server address: {e}"))
    }

    pub fn get_web_socket_addr(&self) -> Result<SocketAddr, String> {
        socket_addr(&self.server.host, self.web.port)
            .map_err(|e| format!("Invalid web server address: {e}"))
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    format!("{host}:{port}").parse()
}
