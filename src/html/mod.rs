//! HTML rendering module
//!
//! Renders the browser views of the page server:
//! - Document viewer page for the quality-tier listing
//! - Error page for failed lookups
//!
//! All interpolated values are escaped with html-escape.

mod viewer;

pub use viewer::{render_document_page, render_error_page};
