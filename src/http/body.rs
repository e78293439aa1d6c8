//! Request body module
//!
//! Bodies are read up to a size limit and decoded as a JSON object. Anything
//! that is not a JSON object (empty body, malformed JSON, arrays, scalars,
//! read errors) decodes to `{}`.

use crate::logger;
use http_body_util::{BodyExt, Limited};
use hyper::body::Body;
use hyper::HeaderMap;
use serde_json::{Map, Value};

/// Check the declared `Content-Length` against the configured maximum
///
/// Missing or unparsable headers are not rejected here; the limited reader
/// still caps what is actually consumed.
pub fn declared_length_exceeds(headers: &HeaderMap, max_body_size: u64) -> bool {
    let Some(content_length) = headers.get("content-length") else {
        return false;
    };
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            false
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                true
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                false
            }
            _ => false,
        },
    )
}

/// Read the whole body (bounded) and decode it as a JSON object
pub async fn read_json_body<B>(body: B, max_body_size: u64) -> Value
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => parse_json_object(&collected.to_bytes()),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            empty_object()
        }
    }
}

/// Decode bytes as a JSON object, falling back to `{}`
pub fn parse_json_object(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return empty_object();
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) | Err(_) => empty_object(),
    }
}

pub fn empty_object() -> Value {
    Value::Object(Map::new())
}
