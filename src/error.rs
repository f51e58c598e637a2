//! Error types for the Page Server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pages::PageError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Status and client-facing message for a page resolution failure
pub fn page_error_parts(err: &PageError) -> (StatusCode, &'static str) {
    match err {
        PageError::DirectoryNotFound(_) => (StatusCode::NOT_FOUND, "Images not found."),
        PageError::NoImages(_) => (StatusCode::NOT_FOUND, "No images found."),
        PageError::InvalidReference(_) => (StatusCode::BAD_REQUEST, "Invalid document reference."),
        PageError::InvalidPattern(_) | PageError::Io(_) => {
            tracing::error!("Page resolution error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Page(e) => {
                let (status, message) = page_error_parts(e);
                (status, message.to_string())
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
