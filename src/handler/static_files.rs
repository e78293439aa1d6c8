//! Static file serving module
//!
//! Resolves request paths under the web server's public root, detects the
//! MIME type and builds the response. Paths that leave the root are refused.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

const INDEX_FILE: &str = "index.html";

/// Serve a file from the public directory, 404 when it cannot be served
pub async fn serve_public(public_dir: &str, request_path: &str) -> Response<Full<Bytes>> {
    match load_public_file(public_dir, request_path).await {
        Some((content, content_type)) => http::build_file_response(content, content_type),
        None => http::build_404_response(),
    }
}

/// Load a file under `public_dir` for the given request path
pub async fn load_public_file(
    public_dir: &str,
    request_path: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let relative = relative_path(request_path)?;

    let root = match fs::canonicalize(public_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are the common 404 case, not worth a warning
    let resolved = fs::canonicalize(root.join(&relative)).await.ok()?;
    if !resolved.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            resolved.display()
        ));
        return None;
    }

    if !fs::metadata(&resolved).await.ok()?.is_file() {
        return None;
    }

    let content = match fs::read(&resolved).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                resolved.display()
            ));
            return None;
        }
    };

    Some((content, mime::content_type_for(&resolved)))
}

/// Map the URL path onto a relative file path
///
/// `/` becomes the index file. Any `..`, root or prefix component rejects the
/// request outright; symlinks are caught later by the canonical prefix check.
fn relative_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(PathBuf::from(INDEX_FILE));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
                return None;
            }
        }
    }
    Some(relative)
}
