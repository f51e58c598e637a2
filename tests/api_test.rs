//! HTTP integration tests for the page endpoints

use std::fs;
use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use page_server::config::{Config, ImageConfig};
use page_server::state::AppState;

fn touch_pages(dir: &Path, names: impl IntoIterator<Item = String>) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(&name), name.as_bytes()).unwrap();
    }
}

fn test_app(root: &Path) -> Router {
    let config = Config {
        images: ImageConfig {
            root: root.to_path_buf(),
            ..ImageConfig::default()
        },
        ..Config::default()
    };
    page_server::app(AppState::new(config).unwrap())
}

/// Image root with a 25-page quality document and a 3-page legacy book
fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    touch_pages(
        &root.join("pdfs/sample/medium_quality"),
        (1..=25).map(|i| format!("p_{:02}.webp", i)),
    );
    fs::create_dir_all(root.join("pdfs/blank/medium_quality")).unwrap();

    touch_pages(
        &root.join("Book/compressed/Physics/intro"),
        ["p_3.webp", "p_1.webp", "p_2.webp", "p_x.webp", "cover.jpg"].map(String::from),
    );
    touch_pages(&root.join("Book/compressed/empty"), ["notes.txt".to_string()]);

    temp_dir
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let temp_dir = fixture();
    let server = TestServer::new(test_app(temp_dir.path())).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "page-server");
}

#[tokio::test]
async fn test_quality_mode_json_pagination() {
    let temp_dir = fixture();

    let (status, body) = get_json(test_app(temp_dir.path()), "/document/sample").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["images"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["images"][0],
        "/files/pdfs/sample/medium_quality/p_01.webp"
    );

    let (_, body) = get_json(test_app(temp_dir.path()), "/document/sample?page=3").await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["images"].as_array().unwrap().len(), 5);

    let (status, body) = get_json(test_app(temp_dir.path()), "/document/sample?page=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"images": [], "page": 50, "hasMore": false}));
}

#[tokio::test]
async fn test_quality_mode_missing_tier_is_empty() {
    let temp_dir = fixture();

    let (status, body) =
        get_json(test_app(temp_dir.path()), "/document/sample?quality=low").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"images": [], "page": 1, "hasMore": false}));
}

#[tokio::test]
async fn test_quality_mode_empty_directory() {
    let temp_dir = fixture();

    let (status, body) = get_json(test_app(temp_dir.path()), "/document/blank").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"images": [], "page": 1, "hasMore": false}));
}

#[tokio::test]
async fn test_quality_mode_missing_document() {
    let temp_dir = fixture();

    let (status, body) = get_json(test_app(temp_dir.path()), "/document/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Images not found."}));
}

#[tokio::test]
async fn test_quality_mode_html() {
    let temp_dir = fixture();
    let server = TestServer::new(test_app(temp_dir.path())).unwrap();

    let response = server.get("/document/sample").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<img src=\"/files/pdfs/sample/medium_quality/p_01.webp\""));
    assert!(html.contains("/document/sample?page=2&amp;quality=medium"));

    let response = server.get("/document/missing").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("Images not found."));
}

#[tokio::test]
async fn test_range_mode_orders_pages() {
    let temp_dir = fixture();

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/Book%2FPDF%2FPhysics%2Fintro.pdf/pages",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "pages": [
                {"number": 1, "url": "/files/Book/compressed/Physics/intro/p_1.webp"},
                {"number": 2, "url": "/files/Book/compressed/Physics/intro/p_2.webp"},
                {"number": 3, "url": "/files/Book/compressed/Physics/intro/p_3.webp"},
            ],
            "totalPages": 3
        })
    );
}

#[tokio::test]
async fn test_range_mode_literal_segments_and_window() {
    let temp_dir = fixture();

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/Book/PDF/Physics/intro.pdf/pages?start=2&count=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["pages"].as_array().unwrap().len(), 1);
    assert_eq!(body["pages"][0]["number"], 2);

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/Book/PDF/Physics/intro.pdf/pages?start=10",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"pages": [], "totalPages": 3}));
}

#[tokio::test]
async fn test_range_mode_not_found() {
    let temp_dir = fixture();

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/Book%2FPDF%2Fmissing.pdf/pages",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Images not found."}));

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/Book%2FPDF%2Fempty.pdf/pages",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No images found."}));
}

#[tokio::test]
async fn test_range_mode_rejects_traversal() {
    let temp_dir = fixture();

    let (status, body) = get_json(
        test_app(temp_dir.path()),
        "/api/document/..%2F..%2Fetc%2Fpasswd/pages",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid document reference."}));
}

#[tokio::test]
async fn test_returned_urls_are_served() {
    let temp_dir = fixture();
    let server = TestServer::new(test_app(temp_dir.path())).unwrap();

    let response = server.get("/api/document/Book/PDF/Physics/intro.pdf/pages").await;
    let body: Value = response.json();

    for page in body["pages"].as_array().unwrap() {
        let url = page["url"].as_str().unwrap();
        let file = server.get(url).await;
        assert_eq!(file.status_code(), StatusCode::OK);
        assert_eq!(file.header("content-type"), "image/webp");
        // Each fixture file holds its own name
        assert_eq!(file.text(), format!("p_{}.webp", page["number"]));
    }
}

#[tokio::test]
async fn test_files_missing() {
    let temp_dir = fixture();
    let server = TestServer::new(test_app(temp_dir.path())).unwrap();

    let response = server.get("/files/Book/compressed/none.webp").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get("/files/Book/compressed").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quality_tokens_are_case_sensitive() {
    let temp_dir = fixture();
    touch_pages(
        &temp_dir.path().join("pdfs/doc/low_quality"),
        ["p_1.webp".to_string()],
    );
    touch_pages(
        &temp_dir.path().join("pdfs/doc/high_quality"),
        ["p_1.webp".to_string()],
    );

    for quality in ["LOW", "Low", "%20low"] {
        let uri = format!("/document/doc?quality={}", quality);
        let (status, body) = get_json(test_app(temp_dir.path()), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["images"],
            json!(["/files/pdfs/doc/high_quality/p_1.webp"]),
            "quality={}",
            quality
        );
    }

    let (_, body) = get_json(test_app(temp_dir.path()), "/document/doc?quality=low").await;
    assert_eq!(body["images"], json!(["/files/pdfs/doc/low_quality/p_1.webp"]));
}

#[tokio::test]
async fn test_quality_mode_html_preferred_over_json() {
    let temp_dir = fixture();
    let server = TestServer::new(test_app(temp_dir.path())).unwrap();

    let response = server
        .get("/document/sample")
        .add_header(
            header::ACCEPT,
            header::HeaderValue::from_static("text/html, application/json"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().starts_with("<!DOCTYPE html>"));
}
