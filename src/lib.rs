//! Page Server Library
//!
//! Serves pre-rendered document page images. Documents are directories of
//! image files under a configured root; clients page through them either
//! by result page (quality tiers) or by explicit page range (legacy book
//! paths).
//!
//! # Modules
//!
//! - `pages`: page resolution and pagination engine
//! - `routes`: HTTP endpoints
//! - `html`: browser views
//! - `config`, `error`, `state`: server plumbing

pub mod config;
pub mod error;
pub mod html;
pub mod pages;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/document", routes::documents::router())
        .nest("/api/document", routes::pages::router())
        .nest("/files", routes::files::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
