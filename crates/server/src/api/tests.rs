//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use glossa_core::{Config, PromptStyle, ProviderKind};
use glossa_export::ArtifactStore;
use glossa_llm::providers::mock::{MockProvider, MockResponse};
use glossa_llm::{ProviderRegistry, TermExtractor};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::router::build_router;
use crate::state::AppState;

const BOUNDARY: &str = "glossa-test-boundary";

struct TestApp {
    router: Router,
    mock: Arc<MockProvider>,
    _dir: tempfile::TempDir,
}

fn test_app(mock: MockProvider, max_upload_bytes: usize) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::for_profile("SRVTEST");
    config.server.max_upload_bytes = max_upload_bytes;
    config.server.cors_origin = "*".to_string();
    config.pipeline.default_provider = ProviderKind::OpenAi;
    config.export.dir = dir.path().join("exports");

    let mock = Arc::new(mock);
    let registry = ProviderRegistry::new().with(ProviderKind::OpenAi, mock.clone());
    let state = AppState {
        extractor: TermExtractor::new(registry, PromptStyle::Ratio),
        artifacts: ArtifactStore::new(&config.export.dir).unwrap(),
        config,
    };
    TestApp {
        router: build_router(Arc::new(state)),
        mock,
        _dir: dir,
    }
}

fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn process_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ── Health ──────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_configured_providers() {
    let app = test_app(MockProvider::always(MockResponse::text("")), 1024);
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, json) = send_json(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    let providers = json["providers"].as_array().unwrap();
    assert_eq!(providers[0]["name"], "openai");
    assert_eq!(providers[0]["configured"], true);
    assert_eq!(providers[1]["name"], "deepseek");
    assert_eq!(providers[1]["configured"], false);
}

#[tokio::test]
async fn health_exposes_settings_without_secrets() {
    let app = test_app(MockProvider::always(MockResponse::text("")), 2048);
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, json) = send_json(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    let config = &json["config"];
    assert_eq!(config["profile"], "SRVTEST");
    assert_eq!(config["server"]["max_upload_bytes"], 2048);
    assert_eq!(config["pipeline"]["default_provider"], "openai");
    assert!(config["providers"]["openai"].get("api_key").is_none());
    assert!(!json.to_string().contains("api_key"));
}

#[tokio::test]
async fn index_lists_defaults() {
    let app = test_app(MockProvider::always(MockResponse::text("")), 1024);
    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, json) = send_json(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "glossa");
    assert_eq!(json["defaults"]["provider"], "openai");
}

// ── Process ─────────────────────────────────────────────────────────

#[tokio::test]
async fn process_extracts_and_normalizes_terms() {
    let app = test_app(
        MockProvider::always(MockResponse::text("* Motor de arranque\tstarter motor\nABS\tABS")),
        1024 * 1024,
    );
    let body = multipart_body(
        &[("source_lang", "es"), ("target_lang", "en"), ("provider", "OpenAI")],
        &[("manual.txt", "El motor de arranque y el ABS.".as_bytes())],
    );
    let (status, json) = send_json(&app.router, process_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["terms"],
        json!([
            {"source": "motor de arranque", "target": "starter motor"},
            {"source": "ABS", "target": "ABS"}
        ])
    );
    assert_eq!(json["source_lang"], "ES");
    assert_eq!(json["target_lang"], "EN");
    assert_eq!(json["files"][0]["status"], "extracted");
    assert_eq!(json["blocks"][0]["status"], "completed");
    assert_eq!(app.mock.call_count(), 1);
}

#[tokio::test]
async fn process_uses_defaults_and_reports_unconfigured_provider() {
    let app = test_app(MockProvider::always(MockResponse::text("a\tb")), 1024 * 1024);
    let body = multipart_body(&[("provider", "deepseek")], &[("notes.txt", b"Texto".as_slice())]);
    let (status, json) = send_json(&app.router, process_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["terms"], json!([]));
    assert_eq!(json["source_lang"], "ES");
    assert_eq!(json["blocks"][0]["status"], "failed");
    assert_eq!(app.mock.call_count(), 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = test_app(MockProvider::always(MockResponse::text("a\tb")), 64);
    let big = vec![b'x'; 4096];
    let body = multipart_body(&[], &[("big.txt", big.as_slice())]);
    let (status, json) = send_json(&app.router, process_request(body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "upload exceeds the 64-byte limit");
    assert_eq!(app.mock.call_count(), 0);
}

// ── Export & download ───────────────────────────────────────────────

#[tokio::test]
async fn export_then_download_both_artifacts() {
    let app = test_app(MockProvider::always(MockResponse::text("")), 1024);
    let req = Request::post("/export")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "terms": [{"source": "motor", "target": "engine"}],
                "source_lang": "ES",
                "target_lang": "EN"
            })
            .to_string(),
        ))
        .unwrap();
    let (status, json) = send_json(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);

    let id = json["export_id"].as_str().unwrap().to_string();
    assert_eq!(json["txt_file"], format!("/download/{id}/txt"));
    assert_eq!(json["excel_file"], format!("/download/{id}/excel"));

    let resp = app
        .router
        .clone()
        .oneshot(Request::get(format!("/download/{id}/txt")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"glosario.txt\""
    );
    let txt = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&txt[..], b"motor");

    let req = Request::get(format!("/download/{id}/excel")).body(Body::empty()).unwrap();
    let (status, xlsx) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);
    let text = glossa_ingest::extract_text(&xlsx, "glosario.xlsx").unwrap();
    assert_eq!(text, "ES EN motor engine");
}

#[tokio::test]
async fn unknown_export_is_not_found() {
    let app = test_app(MockProvider::always(MockResponse::text("")), 1024);
    let req = Request::get("/download/00000000-0000-0000-0000-000000000000/txt")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(&app.router, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));

    let req = Request::get("/download/not-a-uuid/pdf").body(Body::empty()).unwrap();
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
