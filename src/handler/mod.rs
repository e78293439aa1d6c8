//! Request handler module
//!
//! Shared request pipeline plus the route tables of the demo server and the
//! web server.

mod content;
mod dashboard;
mod demo;
pub mod router;
mod static_files;
mod web;

// Re-export main entry point
pub use router::{handle_request, ServerKind};
