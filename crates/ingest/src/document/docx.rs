use quick_xml::events::Event;
use quick_xml::Reader;

use super::office::{self, local_name};
use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Join the text of every paragraph in document order with single spaces.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = office::open(bytes)?;
    let xml = office::require_part(&mut archive, DOCUMENT_PART)?;
    Ok(paragraphs(&xml)?.join(" "))
}

/// Paragraph texts from `word/document.xml`. Runs are concatenated, `w:tab`
/// becomes a tab and `w:br`/`w:cr` a newline, the way Word renders them.
///
/// Paragraphs nested inside another one (text boxes, `w:txbxContent`) are
/// emitted as separate paragraphs, ordered by where they open, and the
/// enclosing paragraph keeps the text on both sides of them.
fn paragraphs(xml: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    // Indices into `paragraphs` of the currently open `w:p` elements.
    let mut open: Vec<usize> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"t" => in_text = !open.is_empty(),
                _ => {}
            },
            Event::Empty(e) => match local_name(e.name().as_ref()) {
                b"p" => paragraphs.push(String::new()),
                b"tab" => push_char(&mut paragraphs, &open, '\t'),
                b"br" | b"cr" => push_char(&mut paragraphs, &open, '\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                if let Some(&i) = open.last() {
                    paragraphs[i].push_str(&text);
                }
            }
            Event::End(e) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"p" => {
                    open.pop();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_char(paragraphs: &mut [String], open: &[usize], c: char) {
    if let Some(&i) = open.last() {
        paragraphs[i].push(c);
    }
}
