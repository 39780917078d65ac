pub mod deepseek;
pub mod mock;
pub mod openai;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use glossa_core::config::LlmConfig;
use glossa_core::ProviderKind;
use tracing::{info, warn};

use crate::provider::{LlmError, LlmProvider};

/// Create the backend for `kind` from config.
pub fn create_provider(
    kind: ProviderKind,
    llm_config: &LlmConfig,
) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let api_key = llm_config
        .api_key(kind)
        .ok_or_else(|| LlmError::NotConfigured(format!("{} API key not set", kind)))?
        .to_string();
    let client = build_client(llm_config.timeout_secs)?;
    let model = llm_config.model(kind).to_string();

    match kind {
        ProviderKind::OpenAi => Ok(Arc::new(openai::OpenAiProvider::new(
            client,
            api_key,
            model,
            llm_config.openai_base_url.clone(),
        ))),
        ProviderKind::DeepSeek => Ok(Arc::new(deepseek::DeepSeekProvider::new(
            client,
            api_key,
            model,
            llm_config.deepseek_base_url.clone(),
        ))),
    }
}

fn build_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// The configured backend for each provider kind. Kinds without
/// credentials are simply absent.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every backend that has credentials. Failures are logged and
    /// leave that kind unconfigured.
    pub fn from_config(llm_config: &LlmConfig) -> Self {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            if !llm_config.is_configured(kind) {
                info!("{} provider not configured", kind);
                continue;
            }
            match create_provider(kind, llm_config) {
                Ok(provider) => {
                    info!("{} provider ready (model {})", kind, llm_config.model(kind));
                    registry.insert(kind, provider);
                }
                Err(e) => warn!(provider = %kind, error = %e, "failed to create provider"),
            }
        }
        registry
    }

    pub fn insert(&mut self, kind: ProviderKind, provider: Arc<dyn LlmProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn with(mut self, kind: ProviderKind, provider: Arc<dyn LlmProvider>) -> Self {
        self.insert(kind, provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }
}
