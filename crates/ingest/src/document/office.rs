//! Shared helpers for Office Open XML containers (DOCX, XLSX).

use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use super::ExtractionError;

pub(super) type OfficeArchive<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub(super) fn open(bytes: &[u8]) -> Result<OfficeArchive<'_>, ExtractionError> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read a part by its path inside the container. `Ok(None)` when absent.
pub(super) fn read_part(
    archive: &mut OfficeArchive<'_>,
    name: &str,
) -> Result<Option<Vec<u8>>, ExtractionError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Like [`read_part`], but a missing part is an error.
pub(super) fn require_part(
    archive: &mut OfficeArchive<'_>,
    name: &str,
) -> Result<Vec<u8>, ExtractionError> {
    read_part(archive, name)?.ok_or_else(|| ExtractionError::MissingPart(name.to_string()))
}

/// Local element name without its namespace prefix (`w:t` → `t`).
pub(super) fn local_name(qname: &[u8]) -> &[u8] {
    match qname.iter().rposition(|&b| b == b':') {
        Some(pos) => &qname[pos + 1..],
        None => qname,
    }
}
