use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GlossaError;

/// A candidate glossary entry: a source-language term and its suggested
/// translation. Equality is structural over both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermPair {
    pub source: String,
    pub target: String,
}

impl TermPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Source/target language codes as supplied by the caller.
///
/// Codes are never checked against a fixed list; they are trimmed and
/// upper-cased and then passed verbatim into prompts and export headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: normalize_lang(source),
            target: normalize_lang(target),
        }
    }

    /// Like [`LanguagePair::new`], but substitutes the defaults for blank codes.
    pub fn with_defaults(
        source: Option<&str>,
        target: Option<&str>,
        default_source: &str,
        default_target: &str,
    ) -> Self {
        let pick = |v: Option<&str>, d: &str| match v.map(str::trim) {
            Some(s) if !s.is_empty() => normalize_lang(s),
            _ => normalize_lang(d),
        };
        Self {
            source: pick(source, default_source),
            target: pick(target, default_target),
        }
    }
}

fn normalize_lang(code: &str) -> String {
    code.trim().to_uppercase()
}

// ── Providers ─────────────────────────────────────────────────

/// Which LLM backend a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    DeepSeek,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::DeepSeek];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Parse a form value. Anything that is not `deepseek` routes to OpenAI.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for ProviderKind {
    type Err = GlossaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(GlossaError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Prompt wording ────────────────────────────────────────────

/// Instruction wording sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Roughly one term per hundred words of input.
    #[default]
    Ratio,
    /// "Only relevant terms", without a density bound.
    Relevant,
}

impl FromStr for PromptStyle {
    type Err = GlossaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ratio" => Ok(PromptStyle::Ratio),
            "relevant" => Ok(PromptStyle::Relevant),
            other => Err(GlossaError::UnknownPromptStyle(other.to_string())),
        }
    }
}
