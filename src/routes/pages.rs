//! Page range API
//!
//! `GET /api/document/{reference}/pages?start=&count=` where `reference`
//! names a book file, percent-encoded or as literal path segments
//! (`Book%2FPDF%2Fintro.pdf` or `Book/PDF/intro.pdf`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::pages::PageRange;
use crate::state::AppState;

/// Create the page range router
pub fn router() -> Router<AppState> {
    Router::new().route("/*reference", get(list_pages))
}

/// Query parameters for the page range
#[derive(Debug, Deserialize)]
pub struct PageRangeQuery {
    /// 1-based position of the first page (default: 1)
    pub start: Option<usize>,
    /// Number of pages (default: configured range size)
    pub count: Option<usize>,
}

async fn list_pages(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<PageRangeQuery>,
) -> Result<Json<PageRange>> {
    let reference = path
        .strip_suffix("/pages")
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::NotFound("Unknown endpoint.".to_string()))?
        .to_string();
    let start = query.start.unwrap_or(1);

    let range = tokio::task::spawn_blocking(move || {
        state.resolver().list_range(&reference, start, query.count)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Page listing task failed: {}", e)))??;

    Ok(Json(range))
}
