//! Page resolution error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving a document's page images
#[derive(Debug, Error)]
pub enum PageError {
    /// Reference is empty, absolute, or escapes the image root
    #[error("Invalid document reference: {0}")]
    InvalidReference(String),

    /// Resolved directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Directory exists but holds no page images
    #[error("No images found in directory: {}", .0.display())]
    NoImages(PathBuf),

    /// Configured page filename pattern is unusable
    #[error("Invalid page pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for page resolution
pub type Result<T> = std::result::Result<T, PageError>;
