use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::term::{PromptStyle, ProviderKind};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Default upload ceiling: 1 GiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Default segmenter block size in characters.
pub const DEFAULT_BLOCK_SIZE: usize = 3000;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub pipeline: PipelineConfig,
    pub llm: LlmConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `GLOSSA_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("GLOSSA_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            pipeline: PipelineConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            export: ExportConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  server:    {}:{} (max upload {} bytes)",
            self.server.host,
            self.server.port,
            self.server.max_upload_bytes
        );
        tracing::info!(
            "  pipeline:  block_size={}, defaults={}→{} via {}, prompt={:?}",
            self.pipeline.block_size,
            self.pipeline.default_source_lang,
            self.pipeline.default_target_lang,
            self.pipeline.default_provider,
            self.pipeline.prompt_style
        );
        for kind in ProviderKind::ALL {
            tracing::info!(
                "  llm:       {} model={} configured={}",
                kind,
                self.llm.model(kind),
                self.llm.is_configured(kind)
            );
        }
        tracing::info!("  export:    dir={}", self.export.dir.display());
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "max_upload_bytes": self.server.max_upload_bytes,
            },
            "pipeline": {
                "block_size": self.pipeline.block_size,
                "default_source_lang": self.pipeline.default_source_lang,
                "default_target_lang": self.pipeline.default_target_lang,
                "default_provider": self.pipeline.default_provider,
                "prompt_style": self.pipeline.prompt_style,
            },
            "providers": {
                "openai": {
                    "model": self.llm.openai_model,
                    "configured": self.llm.is_configured(ProviderKind::OpenAi),
                },
                "deepseek": {
                    "model": self.llm.deepseek_model,
                    "configured": self.llm.is_configured(ProviderKind::DeepSeek),
                },
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "127.0.0.1"),
            port: profiled_env_parse(p, "PORT", 5000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_bytes: profiled_env_parse(p, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub block_size: usize,
    pub default_source_lang: String,
    pub default_target_lang: String,
    pub default_provider: ProviderKind,
    pub prompt_style: PromptStyle,
}

impl PipelineConfig {
    fn from_env_profiled(p: &str) -> Self {
        let block_size = profiled_env_parse(p, "BLOCK_SIZE", DEFAULT_BLOCK_SIZE);
        Self {
            block_size: if block_size == 0 { DEFAULT_BLOCK_SIZE } else { block_size },
            default_source_lang: profiled_env_or(p, "DEFAULT_SOURCE_LANG", "ES").to_uppercase(),
            default_target_lang: profiled_env_or(p, "DEFAULT_TARGET_LANG", "EN").to_uppercase(),
            default_provider: ProviderKind::parse_lenient(&profiled_env_or(
                p,
                "DEFAULT_PROVIDER",
                "openai",
            )),
            prompt_style: profiled_env_parse(p, "PROMPT_STYLE", PromptStyle::Ratio),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            default_source_lang: "ES".to_string(),
            default_target_lang: "EN".to_string(),
            default_provider: ProviderKind::OpenAi,
            prompt_style: PromptStyle::Ratio,
        }
    }
}

// ── LLM (OpenAI / DeepSeek) ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub deepseek_api_key: Option<String>,
    pub deepseek_model: String,
    pub deepseek_base_url: String,
    /// Per-request timeout; `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-3.5-turbo"),
            openai_base_url: profiled_env_or(p, "OPENAI_BASE_URL", "https://api.openai.com"),
            deepseek_api_key: profiled_env_opt(p, "DEEPSEEK_API_KEY"),
            deepseek_model: profiled_env_or(p, "DEEPSEEK_MODEL", "deepseek-chat"),
            deepseek_base_url: profiled_env_or(p, "DEEPSEEK_BASE_URL", "https://api.deepseek.com"),
            timeout_secs: profiled_env_opt(p, "LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
            ProviderKind::DeepSeek => self.deepseek_api_key.as_deref(),
        }
    }

    pub fn model(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAi => &self.openai_model,
            ProviderKind::DeepSeek => &self.deepseek_model,
        }
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.api_key(kind).is_some()
    }
}

// ── Export ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Root directory; every export gets its own subdirectory.
    pub dir: PathBuf,
}

impl ExportConfig {
    fn from_env_profiled(p: &str) -> Self {
        let dir = profiled_env_opt(p, "EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("glossa-exports"));
        Self { dir }
    }
}
