//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality shared by the demo and
//! web servers, decoupled from their routes.

pub mod body;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::{declared_length_exceeds, empty_object, read_json_body};
pub use response::{
    apply_common_headers, build_404_response, build_501_response, build_file_response,
    build_html_response, build_json_response, build_options_response, build_redirect_response,
    JsonStyle,
};
