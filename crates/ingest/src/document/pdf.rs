use std::panic::{self, AssertUnwindSafe};

use super::ExtractionError;

/// Extract the text layer of every page, joined with single spaces.
///
/// Pages without a text layer (scanned images) contribute an empty string.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ExtractionError::Pdf("parser panicked on malformed input".to_string()))?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let text = join_pages(&pages);
    if text.is_empty() {
        tracing::info!(pages = pages.len(), "PDF has no extractable text layer");
    }
    Ok(text)
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
