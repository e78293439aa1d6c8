//! Dashboard page for the demo server
//!
//! The dashboard markup lives inside a script resource as a template literal
//! (``const dashboardHtml = `...`;``). The resource is read on every request
//! and the markup extracted in-process; failures become an inline error page.

use crate::logger;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static DASHBOARD_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const dashboardHtml = `([\s\S]*?)`;").expect("dashboard pattern is valid")
});

const LOADING_ERROR_HTML: &str =
    "<h1>Dashboard Loading Error</h1><p>Please check the server logs.</p>";

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("unable to read dashboard template '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no dashboard markup found in '{0}'")]
    MarkupNotFound(String),
}

/// Produce the dashboard HTML, never failing
pub async fn render(template_path: &str) -> String {
    match load(template_path).await {
        Ok(html) => html,
        Err(e @ DashboardError::Read { .. }) => {
            logger::log_error(&e.to_string());
            format!("<h1>Dashboard Error</h1><p>{e}</p>")
        }
        Err(e @ DashboardError::MarkupNotFound(_)) => {
            logger::log_error(&e.to_string());
            LOADING_ERROR_HTML.to_string()
        }
    }
}

/// Read the template resource and extract its embedded markup
pub async fn load(template_path: &str) -> Result<String, DashboardError> {
    let source = fs::read_to_string(Path::new(template_path))
        .await
        .map_err(|source| DashboardError::Read {
            path: template_path.to_string(),
            source,
        })?;

    extract_markup(&source).ok_or_else(|| DashboardError::MarkupNotFound(template_path.to_string()))
}

/// First embedded template literal, trimmed; `None` when missing or blank
pub fn extract_markup(source: &str) -> Option<String> {
    DASHBOARD_MARKUP
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|html| !html.is_empty())
        .map(ToString::to_string)
}
