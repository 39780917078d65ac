use super::ExtractionError;

const UTF8_BOM: &str = "\u{feff}";

pub fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}
