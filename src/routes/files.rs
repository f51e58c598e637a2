//! File serving routes
//!
//! Serves page images from the image root, so the URLs returned by the
//! listing endpoints resolve against this server.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::error::{AppError, Result};
use crate::pages::sanitize_reference;
use crate::state::AppState;

/// Create the files router
pub fn router() -> Router<AppState> {
    Router::new().route("/*path", get(serve_file))
}

/// Serve a file from the image root
async fn serve_file(State(state): State<AppState>, Path(path): Path<String>) -> Result<Response> {
    let relative = sanitize_reference(&path)?;
    let full_path = state.config().images.root.join(relative);

    let metadata = match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(AppError::NotFound("File not found.".to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("File not found: {}", full_path.display());
            return Err(AppError::NotFound("File not found.".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let bytes = tokio::fs::read(&full_path).await?;

    // Get filename for Content-Disposition
    let filename = path.rsplit('/').next().unwrap_or(&path);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, guess_content_type(&path))
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename.replace('"', "")),
        )
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Guess content type from file extension
fn guess_content_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext.to_lowercase().as_str() {
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
