// Affiliate link fixtures

use serde::Serialize;
use serde_json::Value;

use super::FIXED_TIMESTAMP;

const NEW_LINK_ID: u32 = 12345;
const NEW_LINK_SHORT_URL: &str = "https://aff.ly/ABC123";
const DEFAULT_LINK_NAME: &str = "New Link";
const DEFAULT_ORIGINAL_URL: &str = "https://example.com";

/// Existing link as returned by `GET /api/links`
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    pub id: u32,
    pub name: &'static str,
    pub short_url: &'static str,
    pub original_url: &'static str,
    pub clicks: u32,
    pub conversions: u32,
    pub earnings: f64,
    pub created_at: &'static str,
}

/// Link fabricated for `POST /api/links`
///
/// `name` and `original_url` are echoed back verbatim from the request body,
/// whatever JSON type they carry, `null` included. Defaults only fill absent keys.
#[derive(Debug, Clone, Serialize)]
pub struct NewLink {
    pub id: u32,
    pub name: Value,
    pub short_url: &'static str,
    pub original_url: Value,
    pub created_at: &'static str,
}

impl NewLink {
    pub fn from_body(body: &Value) -> Self {
        let field = |key: &str, default: &str| {
            body.get(key)
                .cloned()
                .unwrap_or_else(|| Value::String(default.to_string()))
        };

        Self {
            id: NEW_LINK_ID,
            name: field("name", DEFAULT_LINK_NAME),
            short_url: NEW_LINK_SHORT_URL,
            original_url: field("original_url", DEFAULT_ORIGINAL_URL),
            created_at: FIXED_TIMESTAMP,
        }
    }
}

pub(super) fn link_records() -> Vec<LinkRecord> {
    vec![
        LinkRecord {
            id: 1,
            name: "Fashion Collection",
            short_url: "https://aff.ly/FAS123",
            original_url: "https://store.com/fashion",
            clicks: 1250,
            conversions: 42,
            earnings: 1680.00,
            created_at: "2024-01-15T10:30:00Z",
        },
        LinkRecord {
            id: 2,
            name: "Tech Gadgets",
            short_url: "https://aff.ly/TECH456",
            original_url: "https://store.com/tech",
            clicks: 890,
            conversions: 28,
            earnings: 1120.00,
            created_at: "2024-01-20T14:45:00Z",
        },
    ]
}
