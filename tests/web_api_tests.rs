//! Integration tests for the Tokensmith Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use std::io::{Cursor, Read};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use tokensmith::models::{Catalog, Session};
use tokensmith::services::{DebouncedPersister, SnapshotStore};
use tokensmith::web::{create_router, AppState};

mod fixtures;
use fixtures::{full_session, json_export, session_with};

fn create_app(session: Session) -> Router {
    create_router(AppState::new(session, Catalog::load().expect("catalog")))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();
    (status, body, content_type)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, body, _) = send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

// ============================================================================
// Read endpoints
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_app(Session::new());
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_empty_session_config() {
    let app = create_app(Session::new());
    let (status, body) = get_json(&app, "/api/config").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["typeScale"], "major-third");
    assert_eq!(body["tokens"], json!({}));
    assert_eq!(body["componentPreferences"], json!({}));
}

#[tokio::test]
async fn test_config_reflects_session() {
    let app = create_app(full_session());
    let (_, body) = get_json(&app, "/api/config").await;

    assert_eq!(body["tokens"]["colors"]["light"]["primary"], "#0284C7");
    assert_eq!(body["tokens"]["colors"]["dark"]["primary"], "#FF00AA");
    assert_eq!(body["tokens"]["radius"]["md"], "10px");
    assert_eq!(body["componentPreferences"]["button"]["id"], "neon");
    assert_eq!(body["typeScale"], "perfect-fourth");
}

#[tokio::test]
async fn test_catalog_listing() {
    let app = create_app(Session::new());
    let (status, body) = get_json(&app, "/api/catalog").await;

    assert_eq!(status, StatusCode::OK);
    let palettes: Vec<&str> = body["categories"]["colors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(palettes, ["ocean", "forest", "ember"]);
    assert_eq!(body["typeScales"].as_array().unwrap().len(), 4);

    let formats = body["formats"].as_array().unwrap();
    assert_eq!(formats.len(), 8);
    let flutter = formats.iter().find(|f| f["id"] == "flutter").unwrap();
    assert_eq!(flutter["bridgeVisible"], false);
    assert_eq!(flutter["fileName"], "design_tokens.dart");
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_select_and_clear() {
    let app = create_app(Session::new());

    let (status, state) =
        send_json(&app, "PUT", "/api/selections/colors", json!({"id": "ember"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["selections"]["colors"], "ember");

    let (_, config) = get_json(&app, "/api/config").await;
    assert_eq!(config["tokens"]["colors"]["light"]["primary"], "#E11D48");

    let (status, state) = delete(&app, "/api/selections/colors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["selections"], json!({}));

    let (_, config) = get_json(&app, "/api/config").await;
    assert!(config["tokens"].get("colors").is_none());
}

#[tokio::test]
async fn test_select_validates_category_and_id() {
    let app = create_app(Session::new());

    let (status, body) =
        send_json(&app, "PUT", "/api/selections/wallpaper", json!({"id": "ocean"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("wallpaper"));

    let (status, _) =
        send_json(&app, "PUT", "/api/selections/button", json!({"id": "ocean"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["selections"], json!({}));
}

#[tokio::test]
async fn test_overrides() {
    let app = create_app(session_with(&[("colors", "ocean")]));

    let (status, state) = send_json(
        &app,
        "PUT",
        "/api/overrides/light/semantic.error",
        json!({"value": "#abc"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["colorOverrides"]["light"]["semantic.error"], "#AABBCC");

    let (_, config) = get_json(&app, "/api/config").await;
    assert_eq!(config["tokens"]["colors"]["light"]["semantic"]["error"], "#AABBCC");
    assert_eq!(config["tokens"]["colors"]["dark"]["primary"], "#38BDF8");

    let (status, _) = delete(&app, "/api/overrides/light/semantic.error").await;
    assert_eq!(status, StatusCode::OK);
    let (_, config) = get_json(&app, "/api/config").await;
    assert_eq!(config["tokens"]["colors"]["light"]["semantic"]["error"], "#DC2626");
}

#[tokio::test]
async fn test_override_validation() {
    let app = create_app(Session::new());

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/overrides/light/primary",
        json!({"value": "blue"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid hex color");

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/overrides/sepia/primary",
        json!({"value": "#000000"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/overrides/dark/sparkle",
        json!({"value": "#000000"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_type_scale() {
    let app = create_app(session_with(&[("typography", "modern-sans")]));

    let (status, state) =
        send_json(&app, "PUT", "/api/type-scale", json!({"id": "golden-ratio"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["typeScale"], "golden-ratio");

    let (status, _) = send_json(&app, "PUT", "/api/type-scale", json!({"id": "huge"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, config) = get_json(&app, "/api/config").await;
    assert_eq!(config["typeScale"], "golden-ratio");
}

#[tokio::test]
async fn test_import_round_trip() {
    let exported = json_export(&full_session());
    let app = create_app(session_with(&[("checkbox", "rounded")]));

    let (status, body, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/import")
            .body(Body::from(exported))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let state: Value = serde_json::from_slice(&body).unwrap();
    assert!(state["selections"].get("checkbox").is_none());
    assert_eq!(state["selections"]["button"], "neon");
    assert_eq!(state["colorOverrides"]["dark"]["primary"], "#FF00AA");
    assert_eq!(state["typeScale"], "perfect-fourth");

    let (_, config) = get_json(&app, "/api/config").await;
    let expected = serde_json::to_value(fixtures::assemble(&full_session())).unwrap();
    assert_eq!(config, expected);
}

#[tokio::test]
async fn test_bad_import_leaves_state_untouched() {
    let app = create_app(session_with(&[("colors", "forest")]));

    for body in ["not json", "[1, 2]", "{\"tokens\": {}}"] {
        let (status, response, _) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/import")
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        let error: Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(error["error"], "Import failed");
    }

    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["selections"], json!({"colors": "forest"}));
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_formats() {
    let app = create_app(full_session());

    let (status, body, content_type) = send(
        &app,
        Request::builder().uri("/api/export/css").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    let css = String::from_utf8(body).unwrap();
    assert!(css.contains("--colors-primary: #0284C7;"));
    assert!(css.contains("--colors-primary: #FF00AA;"));

    let (status, body, content_type) = send(
        &app,
        Request::builder().uri("/api/export/json").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["selections"]["typography"], "editorial");
}

#[tokio::test]
async fn test_app_only_formats_are_not_served() {
    let app = create_app(full_session());

    for format in ["flutter", "react-native", "yaml"] {
        let (status, body, _) = send(
            &app,
            Request::builder()
                .uri(format!("/api/export/{format}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "format: {format}");
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert!(error["details"].as_str().unwrap().contains("claude-md"));
    }
}

#[tokio::test]
async fn test_export_bundle() {
    let app = create_app(full_session());

    let (status, body, content_type) = send(
        &app,
        Request::builder()
            .uri("/api/export-bundle?formats=css,flutter,react-native")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/zip"));

    let mut archive = zip::ZipArchive::new(Cursor::new(body)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        ["design_tokens.dart", "manifest.json", "tokens.css", "tokens.native.ts"]
    );

    let mut dart = String::new();
    archive
        .by_name("design_tokens.dart")
        .unwrap()
        .read_to_string(&mut dart)
        .unwrap();
    assert!(dart.contains("class DesignTokens"));
}

#[tokio::test]
async fn test_export_bundle_errors() {
    let app = create_app(full_session());

    let (status, _, _) = send(
        &app,
        Request::builder()
            .uri("/api/export-bundle")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        Request::builder()
            .uri("/api/export-bundle?formats=css,pdf")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_mutations_write_snapshot() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SnapshotStore::new(temp_dir.path().join("snapshot.json"));
    let state = AppState::new(Session::new(), Catalog::load().unwrap()).with_persister(
        DebouncedPersister::spawn(store.clone(), Duration::from_millis(20)),
    );
    let app = create_router(state);

    send_json(&app, "PUT", "/api/selections/spacing", json!({"id": "compact"})).await;
    send_json(&app, "PUT", "/api/selections/radius", json!({"id": "sharp"})).await;
    // Dropping the last handle to the state flushes the pending write.
    drop(app);

    let snapshot = store.load().expect("snapshot written");
    assert_eq!(snapshot.selections.len(), 2);
    let config = snapshot.config.expect("config stored");
    assert_eq!(config.tokens.radius.unwrap()["full"], "9999px");
}
