mod docx;
mod office;
mod pdf;
mod spreadsheet;
mod txt;
mod xliff;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("Invalid Office container: {0}")]
    Archive(String),
    #[error("Missing document part: {0}")]
    MissingPart(String),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(e: zip::result::ZipError) -> Self {
        ExtractionError::Archive(e.to_string())
    }
}

impl From<quick_xml::Error> for ExtractionError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractionError::Xml(e.to_string())
    }
}

/// Document formats recognized by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Xlsx,
    Csv,
    Pdf,
    Docx,
    Xliff,
    Txt,
}

impl DocumentKind {
    /// Detect the format from the filename extension, case-insensitively.
    /// Content is never sniffed.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = extension(filename);
        match ext.as_str() {
            "xlsx" => Some(DocumentKind::Xlsx),
            "csv" => Some(DocumentKind::Csv),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "xliff" | "sdlxliff" => Some(DocumentKind::Xliff),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }
}

fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Extract the textual content of one document.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| ExtractionError::UnsupportedType(extension(filename)))?;
    extract_kind(bytes, kind)
}

fn extract_kind(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Xlsx => spreadsheet::extract_xlsx(bytes),
        DocumentKind::Csv => spreadsheet::extract_csv(bytes),
        DocumentKind::Pdf => pdf::extract_pdf(bytes),
        DocumentKind::Docx => docx::extract_docx(bytes),
        DocumentKind::Xliff => xliff::extract_xliff(bytes),
        DocumentKind::Txt => txt::extract_txt(bytes),
    }
}

// ── Batch extraction ──────────────────────────────────────────

/// What happened to one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub filename: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Extracted { kind: DocumentKind, chars: usize },
    Unsupported { extension: String },
    Failed { kind: DocumentKind, reason: String },
}

impl FileOutcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self.status, FileStatus::Extracted { .. })
    }
}

/// Concatenated text of a multi-file upload plus a per-file report.
#[derive(Debug, Clone, Default)]
pub struct ExtractionBatch {
    pub text: String,
    pub files: Vec<FileOutcome>,
}

/// Extract every file in order and concatenate the results.
///
/// Each file's text is followed by a newline, including files that failed
/// or are unsupported (they contribute an empty string). A bad file never
/// aborts the batch.
pub fn extract_batch<'a, I>(files: I) -> ExtractionBatch
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut batch = ExtractionBatch::default();

    for (filename, bytes) in files {
        let (text, status) = match DocumentKind::from_filename(filename) {
            None => {
                let extension = extension(filename);
                info!(filename = %filename, extension = %extension, "skipping unsupported file type");
                (String::new(), FileStatus::Unsupported { extension })
            }
            Some(kind) => match extract_kind(bytes, kind) {
                Ok(text) => {
                    let chars = text.chars().count();
                    info!(filename = %filename, ?kind, chars, "extracted text");
                    (text, FileStatus::Extracted { kind, chars })
                }
                Err(e) => {
                    warn!(filename = %filename, ?kind, error = %e, "text extraction failed");
                    (String::new(), FileStatus::Failed { kind, reason: e.to_string() })
                }
            },
        };

        batch.text.push_str(&text);
        batch.text.push('\n');
        batch.files.push(FileOutcome {
            filename: filename.to_string(),
            status,
        });
    }

    batch
}
