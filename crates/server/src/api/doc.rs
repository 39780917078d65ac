//! OpenAPI documentation aggregator, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "glossa API",
        version = "0.1.0",
        description = "Bilingual terminology extraction: upload documents, get term/translation pairs, export a glossary.",
    ),
    tags(
        (name = "Health", description = "Service descriptor and provider readiness"),
        (name = "Extraction", description = "Document upload and LLM term extraction"),
        (name = "Export", description = "Glossary export and artifact downloads"),
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health,
        crate::api::process::process,
        crate::api::export::export,
        crate::api::export::download,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::health::ProviderStatus,
        crate::pipeline::ProcessResponse,
        crate::api::export::ExportRequest,
        crate::api::export::ExportResponse,
    ))
)]
pub struct ApiDoc;
