//! Logger module
//!
//! Logging utilities for the demo and web servers:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_startup(config: &Config) {
    write_info("======================================");
    write_info("Affiliate Boss demo servers starting");
    write_info(&format!("Log level: {}", config.logging.level));
    match config.server.workers {
        Some(workers) => write_info(&format!("Worker threads: {workers}")),
        None => write_info("Worker threads: default (CPU cores)"),
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info(&format!("Max body size: {} bytes", config.http.max_body_size));
    write_info("======================================");
}

pub fn log_demo_server_start(addr: &SocketAddr) {
    write_info(&format!("[DEMO] Demo server running at http://{addr}"));
    write_info(&format!("[DEMO]   - Dashboard:  http://{addr}/dashboard"));
    write_info(&format!("[DEMO]   - Short link: http://{addr}/go/mbp001"));
    write_info(&format!("[DEMO]   - KPIs:       http://{addr}/api/kpis/dashboard"));
}

pub fn log_web_server_start(addr: &SocketAddr, public_dir: &str) {
    write_info(&format!("[WEB] Web server running at http://{addr}"));
    write_info(&format!("[WEB]   - Static root: {public_dir}"));
    write_info(&format!("[WEB]   - API health:  http://{addr}/api/health"));
}

pub fn log_server_disabled(name: &str) {
    write_info(&format!("[CONFIG] {name} server disabled"));
}

pub fn log_connection_accepted(log_prefix: &str, peer_addr: &SocketAddr) {
    write_info(&format!("{log_prefix} [Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown(log_prefix: &str) {
    write_info(&format!("{log_prefix} Shutdown requested, no longer accepting connections"));
}
