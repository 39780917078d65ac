use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use glossa_core::{LanguagePair, TermPair};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{render_txt, write_xlsx, ExportError};

/// The two downloadable files of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Txt,
    Excel,
}

impl ArtifactKind {
    /// Attachment name offered to the client; also the on-disk name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Txt => "glosario.txt",
            ArtifactKind::Excel => "glosario.xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Txt => "text/plain; charset=utf-8",
            ArtifactKind::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "txt" => Some(ArtifactKind::Txt),
            "excel" | "xlsx" => Some(ArtifactKind::Excel),
            _ => None,
        }
    }
}

/// Identifies one export and summarizes what went into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportHandle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub source_lang: String,
    pub target_lang: String,
    pub term_count: usize,
}

/// Filesystem-backed export artifacts.
///
/// ```text
/// exports/
///   {uuid}/
///     glosario.txt
///     glosario.xlsx
/// ```
///
/// Every export gets a fresh directory, so concurrent exports never touch
/// each other's files.
pub struct ArtifactStore {
    base_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write both artifacts for `terms` and return their handle.
    pub fn export(
        &self,
        terms: &[TermPair],
        langs: &LanguagePair,
    ) -> Result<ExportHandle, ExportError> {
        let handle = ExportHandle {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source_lang: langs.source.clone(),
            target_lang: langs.target.clone(),
            term_count: terms.len(),
        };
        let dir = self.base_dir.join(handle.id.to_string());
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(ArtifactKind::Txt.file_name()), render_txt(terms))?;

        let file = fs::File::create(dir.join(ArtifactKind::Excel.file_name()))?;
        write_xlsx(BufWriter::new(file), terms, langs)?.flush()?;

        info!(
            "Export {} written: {} terms ({} → {})",
            handle.id, handle.term_count, handle.source_lang, handle.target_lang
        );
        Ok(handle)
    }

    /// Path of an existing artifact. Ids that are not UUIDs or that were
    /// never exported are reported as unknown.
    pub fn artifact_path(&self, id: &str, kind: ArtifactKind) -> Result<PathBuf, ExportError> {
        let id = Uuid::parse_str(id).map_err(|_| ExportError::UnknownExport(id.to_string()))?;
        let path = self.base_dir.join(id.to_string()).join(kind.file_name());
        if !path.is_file() {
            return Err(ExportError::UnknownExport(id.to_string()));
        }
        Ok(path)
    }

    pub fn read_artifact(&self, id: &str, kind: ArtifactKind) -> Result<Vec<u8>, ExportError> {
        let path = self.artifact_path(id, kind)?;
        Ok(fs::read(path)?)
    }
}
