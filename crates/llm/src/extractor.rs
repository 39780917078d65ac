//! Term extraction client: one provider call per block, with the result
//! recorded as an explicit per-block outcome instead of an error.

use glossa_core::{LanguagePair, PromptStyle, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::prompt::build_prompt;
use crate::provider::Message;
use crate::providers::ProviderRegistry;

/// What happened to one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOutcome {
    pub index: usize,
    /// Block length in characters.
    pub chars: usize,
    #[serde(flatten)]
    pub status: BlockStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockStatus {
    /// `lines` counts the tab-separated lines in the reply.
    Completed { lines: usize },
    /// Blank block; no provider was called.
    Skipped,
    Failed { reason: String },
}

impl BlockOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, BlockStatus::Failed { .. })
    }
}

/// Raw model output for one block. `raw` is empty unless the call completed.
#[derive(Debug, Clone)]
pub struct BlockResult {
    pub raw: String,
    pub outcome: BlockOutcome,
}

#[derive(Clone)]
pub struct TermExtractor {
    providers: ProviderRegistry,
    style: PromptStyle,
}

impl TermExtractor {
    pub fn new(providers: ProviderRegistry, style: PromptStyle) -> Self {
        Self { providers, style }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Ask `kind` for the terms in `block`. Never fails: blank blocks are
    /// skipped and provider errors become a `Failed` outcome.
    pub async fn extract_terms(
        &self,
        index: usize,
        block: &str,
        langs: &LanguagePair,
        kind: ProviderKind,
    ) -> BlockResult {
        let chars = block.chars().count();
        let finish = |raw: String, status: BlockStatus| BlockResult {
            raw,
            outcome: BlockOutcome { index, chars, status },
        };

        if block.trim().is_empty() {
            debug!(block = index, "blank block skipped");
            return finish(String::new(), BlockStatus::Skipped);
        }

        let Some(provider) = self.providers.get(kind) else {
            warn!(block = index, provider = %kind, "provider not configured");
            return finish(
                String::new(),
                BlockStatus::Failed {
                    reason: format!("provider not configured: {}", kind),
                },
            );
        };

        let prompt = build_prompt(block, langs, self.style);
        match provider.complete(vec![Message::user(prompt)]).await {
            Ok(raw) => {
                let lines = raw.lines().filter(|l| l.contains('\t')).count();
                debug!(block = index, provider = provider.name(), lines, "block completed");
                finish(raw, BlockStatus::Completed { lines })
            }
            Err(e) => {
                warn!(block = index, provider = provider.name(), error = %e, "term extraction failed");
                finish(
                    String::new(),
                    BlockStatus::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}
