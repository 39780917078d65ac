//! Service descriptor and readiness endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use glossa_core::ProviderKind;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProviderStatus {
    pub name: &'static str,
    pub model: String,
    pub configured: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub providers: Vec<ProviderStatus>,
    /// Effective settings with API keys left out.
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
}

/// Health check
///
/// Reports which LLM providers can serve requests and the effective settings.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let providers = ProviderKind::ALL
        .into_iter()
        .map(|kind| ProviderStatus {
            name: kind.as_str(),
            model: state.config.llm.model(kind).to_string(),
            configured: state.extractor.providers().is_configured(kind),
        })
        .collect();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        providers,
        config: state.config.redacted_summary(),
    })
}

/// Service descriptor
///
/// Lists the routes and the form defaults used by `/process`.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service descriptor", body = Object))
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let pipeline = &state.config.pipeline;
    Json(serde_json::json!({
        "service": "glossa",
        "version": env!("CARGO_PKG_VERSION"),
        "defaults": {
            "source_lang": pipeline.default_source_lang,
            "target_lang": pipeline.default_target_lang,
            "provider": pipeline.default_provider,
        },
        "formats": ["pdf", "docx", "xlsx", "csv", "xliff", "sdlxliff", "txt"],
        "routes": {
            "process": "POST /process",
            "export": "POST /export",
            "download": "GET /download/{id}/txt | GET /download/{id}/excel",
            "docs": "GET /docs",
        },
    }))
}
