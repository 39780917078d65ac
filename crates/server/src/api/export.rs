//! `POST /export` and the per-export download routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use glossa_core::{LanguagePair, TermPair};
use glossa_export::{ArtifactKind, ExportError};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

use super::{internal_error, not_found, ApiResult, ErrorResponse};

fn default_source_lang() -> String {
    "ES".to_string()
}

fn default_target_lang() -> String {
    "EN".to_string()
}

/// Language codes are used verbatim as the spreadsheet header.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ExportRequest {
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub terms: Vec<TermPair>,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExportResponse {
    pub export_id: String,
    pub txt_file: String,
    pub excel_file: String,
}

/// Export a glossary
///
/// Writes the plain-text and spreadsheet artifacts and returns their
/// download links.
#[utoipa::path(
    post,
    path = "/export",
    tag = "Export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Artifacts written", body = ExportResponse),
        (status = 500, description = "Artifacts could not be written", body = ErrorResponse)
    )
)]
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> ApiResult<Json<ExportResponse>> {
    let langs = LanguagePair {
        source: req.source_lang,
        target: req.target_lang,
    };
    let handle = state
        .artifacts
        .export(&req.terms, &langs)
        .map_err(internal_error)?;

    let id = handle.id.to_string();
    Ok(Json(ExportResponse {
        txt_file: format!("/download/{}/txt", id),
        excel_file: format!("/download/{}/excel", id),
        export_id: id,
    }))
}

/// Download an export artifact
///
/// `kind` is `txt` or `excel`. The file is sent as an attachment named
/// `glosario.txt` or `glosario.xlsx`.
#[utoipa::path(
    get,
    path = "/download/{id}/{kind}",
    tag = "Export",
    params(
        ("id" = String, Path, description = "Export ID returned by /export"),
        ("kind" = String, Path, description = "`txt` or `excel`")
    ),
    responses(
        (status = 200, description = "Artifact contents"),
        (status = 404, description = "Unknown export or artifact", body = ErrorResponse)
    )
)]
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path((id, kind)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let kind = ArtifactKind::parse(&kind).ok_or_else(|| not_found("artifact", &kind))?;
    let bytes = state
        .artifacts
        .read_artifact(&id, kind)
        .map_err(|e| match e {
            ExportError::UnknownExport(_) => not_found("export", &id),
            other => internal_error(other),
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, kind.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.file_name()),
            ),
        ],
        bytes,
    ))
}
