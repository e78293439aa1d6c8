//! Marketing copy generator for `POST /api/tools/content`
//!
//! Plain string interpolation into one of four fixed templates. Inputs are
//! neither escaped nor validated.

use serde::Serialize;
use serde_json::Value;

use crate::fixtures::FIXED_TIMESTAMP;

const DEFAULT_CONTENT_TYPE: &str = "product_description";
const DEFAULT_PRODUCT_NAME: &str = "Sample Product";
const DEFAULT_KEYWORDS: &str = "amazing benefits";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    ProductDescription,
    EmailCampaign,
    SocialPost,
    BlogPost,
}

impl ContentKind {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "product_description" => Some(Self::ProductDescription),
            "email_campaign" => Some(Self::EmailCampaign),
            "social_post" => Some(Self::SocialPost),
            "blog_post" => Some(Self::BlogPost),
            _ => None,
        }
    }

    fn render(self, product: &str, keywords: &str) -> String {
        match self {
            Self::ProductDescription => format!(
                "Discover the amazing {product}! This incredible product features cutting-edge \
                 technology and premium quality. Perfect for anyone looking to {keywords}. \
                 Don't miss out on this exclusive opportunity!"
            ),
            Self::EmailCampaign => format!(
                "Subject: Exclusive Deal on {product}!\n\nHi there!\n\nI wanted to share this \
                 amazing product with you - {product}. It's perfect for {keywords} and I think \
                 you'll love it!\n\nCheck it out here: [Your Affiliate Link]\n\nBest regards,\n\
                 [Your Name]"
            ),
            Self::SocialPost => format!(
                "\u{1F525} Just discovered {product}! Perfect for {keywords}. Highly recommended! \
                 #affiliate #{} [link]",
                keywords.replace(' ', "")
            ),
            Self::BlogPost => format!(
                "# {product} Review: Everything You Need to Know\n\n## Introduction\n{product} \
                 has been making waves in the market, and for good reason. In this comprehensive \
                 review, I'll share my experience with this product.\n\n## Key Features\n\
                 - Premium quality\n- Easy to use\n- Great value\n\n## Final Thoughts\nIf you're \
                 looking for {keywords}, {product} is definitely worth considering. [Affiliate Link]"
            ),
        }
    }
}

/// Inputs pulled from the request body
///
/// Defaults apply only to absent keys. A key that is present, even as
/// `null`, is taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// Echoed back verbatim
    pub content_type: Value,
    pub product_name: String,
    pub keywords: String,
}

impl ContentRequest {
    pub fn from_body(body: &Value) -> Self {
        Self {
            content_type: body
                .get("content_type")
                .cloned()
                .unwrap_or_else(|| Value::String(DEFAULT_CONTENT_TYPE.to_string())),
            product_name: text_field(body, "product_name", DEFAULT_PRODUCT_NAME),
            keywords: text_field(body, "keywords", DEFAULT_KEYWORDS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub content_type: Value,
    pub generated_at: &'static str,
}

pub fn generate(request: ContentRequest) -> GeneratedContent {
    let kind = request.content_type.as_str().and_then(ContentKind::from_key);
    let content = match kind {
        Some(kind) => kind.render(&request.product_name, &request.keywords),
        None => format!("Generated content for {}", request.product_name),
    };

    GeneratedContent {
        content,
        content_type: request.content_type,
        generated_at: FIXED_TIMESTAMP,
    }
}

/// Strings are used as-is, any other value (`null` included) by its JSON text
fn text_field(body: &Value, key: &str, default: &str) -> String {
    match body.get(key) {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
