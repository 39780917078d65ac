//! `POST /process`: run the extraction pipeline over uploaded files.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use glossa_core::{LanguagePair, ProviderKind};
use tracing::debug;

use crate::pipeline::{run_pipeline, ProcessResponse, UploadedFile};
use crate::state::AppState;

use super::{bad_request, error_response, ApiResult, ErrorResponse};

/// Extract terms from uploaded documents
///
/// Accepts multipart/form-data with repeated `files` fields plus optional
/// `source_lang`, `target_lang` and `provider` fields. Files that cannot be
/// read and blocks the provider fails on are reported, not fatal.
#[utoipa::path(
    post,
    path = "/process",
    tag = "Extraction",
    request_body(content_type = "multipart/form-data", description = "Files and language pair"),
    responses(
        (status = 200, description = "Extracted terms with per-file and per-block outcomes", body = ProcessResponse),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the configured limit", body = ErrorResponse)
    )
)]
pub async fn process(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProcessResponse>> {
    let limit = state.config.server.max_upload_bytes;
    let mut files = Vec::new();
    let mut source_lang = None;
    let mut target_lang = None;
    let mut provider = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "files[]" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                // Browsers send an empty part when no file was chosen.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                debug!("Received '{}' ({} bytes)", filename, bytes.len());
                files.push(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "source_lang" => source_lang = Some(field.text().await.map_err(|e| multipart_error(e, limit))?),
            "target_lang" => target_lang = Some(field.text().await.map_err(|e| multipart_error(e, limit))?),
            "provider" => provider = Some(field.text().await.map_err(|e| multipart_error(e, limit))?),
            other => debug!("Ignoring form field '{}'", other),
        }
    }

    let pipeline = &state.config.pipeline;
    let langs = LanguagePair::with_defaults(
        source_lang.as_deref(),
        target_lang.as_deref(),
        &pipeline.default_source_lang,
        &pipeline.default_target_lang,
    );
    let provider = resolve_provider(provider.as_deref(), pipeline.default_provider);

    let response = run_pipeline(
        &state.extractor,
        &files,
        &langs,
        provider,
        pipeline.block_size,
    )
    .await;
    Ok(Json(response))
}

/// Blank means the configured default; anything unrecognised means OpenAI.
fn resolve_provider(value: Option<&str>, default: ProviderKind) -> ProviderKind {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => ProviderKind::parse_lenient(v),
        _ => default,
    }
}

fn multipart_error(e: MultipartError, limit: usize) -> (StatusCode, Json<ErrorResponse>) {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("upload exceeds the {}-byte limit", limit),
        );
    }
    bad_request(format!("Multipart error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_resolution() {
        assert_eq!(resolve_provider(None, ProviderKind::DeepSeek), ProviderKind::DeepSeek);
        assert_eq!(resolve_provider(Some("  "), ProviderKind::DeepSeek), ProviderKind::DeepSeek);
        assert_eq!(resolve_provider(Some("DEEPSEEK"), ProviderKind::OpenAi), ProviderKind::DeepSeek);
        assert_eq!(resolve_provider(Some("mistral"), ProviderKind::DeepSeek), ProviderKind::OpenAi);
    }
}
