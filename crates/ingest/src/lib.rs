pub mod document;
pub mod segment;

pub use document::{extract_batch, extract_text, DocumentKind, ExtractionBatch, ExtractionError, FileOutcome, FileStatus};
pub use segment::segment;
