//! Document viewer endpoint
//!
//! `GET /document/:document_id?page=&quality=` lists one page of a
//! document's quality-tier images. Clients asking for JSON get
//! `{images, page, hasMore}`; browsers get the HTML viewer.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{page_error_parts, AppError};
use crate::html::{render_document_page, render_error_page};
use crate::pages::{PageError, QualityTier};
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new().route("/:document_id", get(show_document))
}

/// Query parameters for the document viewer
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    /// 1-based page of results (default: 1)
    pub page: Option<usize>,
    /// low, medium or high (default: medium)
    pub quality: Option<String>,
}

/// JSON error body of this endpoint
#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn show_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(query): Query<DocumentQuery>,
    headers: HeaderMap,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let quality = query
        .quality
        .as_deref()
        .map(QualityTier::parse)
        .unwrap_or_default();
    let json = wants_json(&headers);

    let id = document_id.clone();
    let result = tokio::task::spawn_blocking(move || {
        state.resolver().list_quality(&id, quality, page)
    })
    .await;

    match result {
        Ok(Ok(images)) if json => Json(images).into_response(),
        Ok(Ok(images)) => Html(render_document_page(&document_id, &images, quality)).into_response(),
        Ok(Err(e)) => error_response(&e, json),
        Err(e) => AppError::Internal(format!("Page listing task failed: {}", e)).into_response(),
    }
}

fn error_response(err: &PageError, json: bool) -> Response {
    let (status, message) = page_error_parts(err);
    if json {
        (status, Json(MessageResponse { message })).into_response()
    } else {
        (status, Html(render_error_page(message))).into_response()
    }
}

/// Whether the client expects a JSON response.
///
/// True when the highest ranked `Accept` media type is JSON, or for
/// non-PJAX XMLHttpRequest requests that accept any content type.
pub fn wants_json(headers: &HeaderMap) -> bool {
    let preferred = preferred_media_type(headers);

    if let Some(media) = preferred.as_deref() {
        if media.contains("/json") || media.contains("+json") {
            return true;
        }
    }

    let ajax = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false);
    let pjax = headers.contains_key("x-pjax");
    let accepts_any = matches!(preferred.as_deref(), None | Some("*/*") | Some("*"));

    ajax && !pjax && accepts_any
}

/// Media type with the highest `q` in the `Accept` header, first wins on ties
fn preferred_media_type(headers: &HeaderMap) -> Option<String> {
    let accept = headers.get(header::ACCEPT)?.to_str().ok()?;

    let mut best: Option<(&str, f32)> = None;
    for entry in accept.split(',') {
        let mut parts = entry.split(';');
        let media = parts.next().unwrap_or("").trim();
        if media.is_empty() {
            continue;
        }
        let quality = parts
            .filter_map(|param| param.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        if best.map_or(true, |(_, q)| quality > q) {
            best = Some((media, quality));
        }
    }

    best.map(|(media, _)| media.to_ascii_lowercase())
}
