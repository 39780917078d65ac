mod api;
mod cli;
mod pipeline;
mod router;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glossa_core::{Config, LanguagePair, ProviderKind};
use glossa_export::ArtifactStore;
use glossa_llm::{ProviderRegistry, TermExtractor};
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::pipeline::{run_pipeline, UploadedFile};
use crate::state::AppState;

fn load_config() -> Config {
    glossa_core::config::load_dotenv();
    Config::from_env()
}

fn build_state(config: Config) -> anyhow::Result<AppState> {
    let providers = ProviderRegistry::from_config(&config.llm);
    let extractor = TermExtractor::new(providers, config.pipeline.prompt_style);
    let artifacts = ArtifactStore::new(&config.export.dir).with_context(|| {
        format!("failed to create export dir {}", config.export.dir.display())
    })?;
    Ok(AppState {
        config,
        extractor,
        artifacts,
    })
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(build_state(config)?);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn extract(
    config: Config,
    paths: Vec<PathBuf>,
    source: Option<String>,
    target: Option<String>,
    provider: Option<String>,
    export: bool,
) -> anyhow::Result<()> {
    let state = build_state(config)?;
    let pipeline = &state.config.pipeline;

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(UploadedFile { filename, bytes });
    }

    let langs = LanguagePair::with_defaults(
        source.as_deref(),
        target.as_deref(),
        &pipeline.default_source_lang,
        &pipeline.default_target_lang,
    );
    let provider = provider
        .as_deref()
        .map(ProviderKind::parse_lenient)
        .unwrap_or(pipeline.default_provider);

    let response = run_pipeline(&state.extractor, &files, &langs, provider, pipeline.block_size).await;

    if export {
        let handle = state.artifacts.export(&response.terms, &langs)?;
        let dir = state.artifacts.base_dir().join(handle.id.to_string());
        info!("Glossary written to {}", dir.display());
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config();

    match args.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => serve(config, host, port).await?,
        Command::Extract {
            files,
            source,
            target,
            provider,
            export,
        } => extract(config, files, source, target, provider, export).await?,
    }

    Ok(())
}
