//! The extraction pipeline for one request: extract every file, segment the
//! concatenated text, ask the provider about each block in order, and fold
//! the replies into a deduplicated term list.
//!
//! Nothing here fails the request. Bad files and failed blocks are reported
//! in `files` and `blocks` and simply contribute no terms.

use glossa_core::{LanguagePair, ProviderKind, TermAggregator, TermPair};
use glossa_ingest::{extract_batch, segment, FileOutcome};
use glossa_llm::{BlockOutcome, TermExtractor};
use serde::Serialize;
use tracing::info;

pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProcessResponse {
    #[schema(value_type = Vec<Object>)]
    pub terms: Vec<TermPair>,
    pub source_lang: String,
    pub target_lang: String,
    #[schema(value_type = Vec<Object>)]
    pub files: Vec<FileOutcome>,
    #[schema(value_type = Vec<Object>)]
    pub blocks: Vec<BlockOutcome>,
}

pub async fn run_pipeline(
    extractor: &TermExtractor,
    files: &[UploadedFile],
    langs: &LanguagePair,
    provider: ProviderKind,
    block_size: usize,
) -> ProcessResponse {
    let batch = extract_batch(files.iter().map(|f| (f.filename.as_str(), f.bytes.as_slice())));
    let blocks = segment(&batch.text, block_size);
    info!(
        "Processing {} files ({} chars) in {} blocks via {} ({} → {})",
        files.len(),
        batch.text.chars().count(),
        blocks.len(),
        provider,
        langs.source,
        langs.target
    );

    let mut aggregator = TermAggregator::new();
    let mut outcomes = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let result = extractor.extract_terms(index, block, langs, provider).await;
        aggregator.push_raw(&result.raw);
        outcomes.push(result.outcome);
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!("Extracted {} unique terms ({} blocks failed)", aggregator.len(), failed);

    ProcessResponse {
        terms: aggregator.into_terms(),
        source_lang: langs.source.clone(),
        target_lang: langs.target.clone(),
        files: batch.files,
        blocks: outcomes,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glossa_core::PromptStyle;
    use glossa_llm::providers::mock::{MockProvider, MockResponse};
    use glossa_llm::{BlockStatus, ProviderRegistry};

    use super::*;

    fn txt(name: &str, text: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }

    fn extractor(mock: Arc<MockProvider>) -> TermExtractor {
        TermExtractor::new(
            ProviderRegistry::new().with(ProviderKind::OpenAi, mock),
            PromptStyle::Ratio,
        )
    }

    #[tokio::test]
    async fn failed_block_does_not_lose_the_others() {
        let mock = Arc::new(MockProvider::scripted(vec![
            MockResponse::text("motor\tengine\n- Freno:\tbrake"),
            MockResponse::Error(429),
            MockResponse::text("NASA\tNASA\nmotor\tengine\nsin tabulador"),
        ]));
        // 12 chars plus the trailing newline: three blocks of at most 5.
        let files = vec![txt("a.txt", "motorfrenos!")];
        let response = run_pipeline(
            &extractor(mock.clone()),
            &files,
            &LanguagePair::new("es", "en"),
            ProviderKind::OpenAi,
            5,
        )
        .await;

        assert_eq!(mock.call_count(), 3);
        assert_eq!(
            response.terms,
            vec![
                TermPair::new("motor", "engine"),
                TermPair::new("freno", "brake"),
                TermPair::new("NASA", "NASA"),
            ]
        );
        assert_eq!(response.blocks.len(), 3);
        assert_eq!(response.blocks[0].status, BlockStatus::Completed { lines: 2 });
        assert!(response.blocks[1].is_failed());
        assert_eq!(response.blocks[2].status, BlockStatus::Completed { lines: 2 });
        assert_eq!(response.source_lang, "ES");
        assert_eq!(response.target_lang, "EN");
    }

    #[tokio::test]
    async fn files_are_concatenated_in_order() {
        let mock = Arc::new(MockProvider::always(MockResponse::text("")));
        let files = vec![txt("a.txt", "Alpha"), txt("b.txt", "Beta")];
        let response = run_pipeline(
            &extractor(mock.clone()),
            &files,
            &LanguagePair::new("ES", "EN"),
            ProviderKind::OpenAi,
            3000,
        )
        .await;

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("Texto:\nAlpha\nBeta\n"));
        assert_eq!(response.files.len(), 2);
        assert!(response.terms.is_empty());
    }

    #[tokio::test]
    async fn unsupported_files_only_yield_skipped_blocks() {
        let mock = Arc::new(MockProvider::always(MockResponse::text("a\tb")));
        let files = vec![UploadedFile {
            filename: "photo.png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }];
        let response = run_pipeline(
            &extractor(mock.clone()),
            &files,
            &LanguagePair::new("ES", "EN"),
            ProviderKind::OpenAi,
            3000,
        )
        .await;

        // The lone "\n" separator is blank, so the provider is never called.
        assert_eq!(mock.call_count(), 0);
        assert_eq!(response.blocks.len(), 1);
        assert_eq!(response.blocks[0].status, BlockStatus::Skipped);
        assert!(response.terms.is_empty());
        assert!(!response.files[0].is_extracted());
    }

    #[tokio::test]
    async fn no_files_is_an_empty_result() {
        let mock = Arc::new(MockProvider::always(MockResponse::text("a\tb")));
        let response = run_pipeline(
            &extractor(mock),
            &[],
            &LanguagePair::new("ES", "EN"),
            ProviderKind::OpenAi,
            3000,
        )
        .await;
        assert!(response.terms.is_empty());
        assert!(response.blocks.is_empty());
        assert!(response.files.is_empty());
    }
}
