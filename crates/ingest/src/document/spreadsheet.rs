//! Spreadsheet extraction: every non-empty cell of every sheet, row-major,
//! joined with single spaces.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::office::{self, local_name, OfficeArchive};
use super::ExtractionError;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

pub fn extract_xlsx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = office::open(bytes)?;

    let shared = match office::read_part(&mut archive, SHARED_STRINGS_PART)? {
        Some(xml) => shared_strings(&xml)?,
        None => Vec::new(),
    };

    let mut cells = Vec::new();
    for sheet in sheet_parts(&mut archive)? {
        match office::read_part(&mut archive, &sheet)? {
            Some(xml) => cells.extend(sheet_cells(&xml, &shared)?),
            None => tracing::warn!(part = %sheet, "worksheet listed in workbook is missing"),
        }
    }

    Ok(cells.join(" "))
}

pub fn extract_csv(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.extend(
            record
                .iter()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }
    Ok(cells.join(" "))
}

// ── Workbook structure ────────────────────────────────────────

/// Worksheet part paths in workbook (tab) order.
fn sheet_parts(archive: &mut OfficeArchive<'_>) -> Result<Vec<String>, ExtractionError> {
    let workbook = office::require_part(archive, WORKBOOK_PART)?;
    let rel_ids = sheet_rel_ids(&workbook)?;

    let targets = match office::read_part(archive, WORKBOOK_RELS_PART)? {
        Some(rels) => relationship_targets(&rels)?,
        None => HashMap::new(),
    };

    let mut parts: Vec<String> = rel_ids
        .iter()
        .filter_map(|id| targets.get(id))
        .map(|target| resolve_target(target))
        .collect();

    if parts.is_empty() {
        // No usable relationships: fall back to the conventional sheetN.xml names.
        let mut names: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| {
                let n = name
                    .strip_prefix("xl/worksheets/sheet")?
                    .strip_suffix(".xml")?
                    .parse()
                    .ok()?;
                Some((n, name.to_string()))
            })
            .collect();
        names.sort();
        parts = names.into_iter().map(|(_, name)| name).collect();
    }

    Ok(parts)
}

fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// `r:id` of each `<sheet>` in `xl/workbook.xml`, in order.
fn sheet_rel_ids(xml: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut ids = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if local_name(e.name().as_ref()) == b"sheet" => {
                if let Some(id) = attr_value(&e, b"r:id") {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(ids)
}

/// Relationship id → target from `xl/_rels/workbook.xml.rels`.
fn relationship_targets(xml: &[u8]) -> Result<HashMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e)
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id"), attr_value(&e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

// ── Cell content ──────────────────────────────────────────────

/// Each `<si>` of the shared string table, with rich-text runs concatenated.
/// Phonetic hints (`<rPh>`) are not part of the cell value.
fn shared_strings(xml: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut in_phonetic = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"si" => strings.push(String::new()),
                b"rPh" => in_phonetic = true,
                b"t" => in_text = !in_phonetic,
                _ => {}
            },
            Event::Empty(e) if local_name(e.name().as_ref()) == b"si" => strings.push(String::new()),
            Event::End(e) => match local_name(e.name().as_ref()) {
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                if let Some(s) = strings.last_mut() {
                    s.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

#[derive(Clone, Copy, PartialEq)]
enum CellType {
    Shared,
    Inline,
    Boolean,
    Other,
}

/// Display values of all non-empty cells of one worksheet, row-major.
fn sheet_cells(xml: &[u8], shared: &[String]) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut cells = Vec::new();

    let mut cell_type = CellType::Other;
    let mut in_cell = false;
    let mut capturing = false;
    let mut value = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"c" => {
                    in_cell = true;
                    value.clear();
                    cell_type = match attr_value(&e, b"t").as_deref() {
                        Some("s") => CellType::Shared,
                        Some("inlineStr") => CellType::Inline,
                        Some("b") => CellType::Boolean,
                        _ => CellType::Other,
                    };
                }
                // Formula text is not a value.
                b"v" if in_cell => capturing = true,
                b"t" if in_cell && cell_type == CellType::Inline => capturing = true,
                _ => {}
            },
            Event::Text(e) if capturing => {
                let text = e.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                value.push_str(&text);
            }
            Event::End(e) => match local_name(e.name().as_ref()) {
                b"v" | b"t" => capturing = false,
                b"c" => {
                    in_cell = false;
                    if let Some(display) = cell_display(cell_type, &value, shared) {
                        cells.push(display);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(cells)
}

fn cell_display(cell_type: CellType, raw: &str, shared: &[String]) -> Option<String> {
    let display = match cell_type {
        CellType::Shared => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared.get(idx))
            .cloned()
            .unwrap_or_default(),
        CellType::Boolean => match raw.trim() {
            "1" => "TRUE".to_string(),
            "0" => "FALSE".to_string(),
            other => other.to_string(),
        },
        CellType::Inline | CellType::Other => raw.to_string(),
    };
    let display = display.trim();
    (!display.is_empty()).then(|| display.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_row_major() {
        let csv = b"termino,traduccion\nmotor,engine\n\"freno, disco\",brake disc\n";
        assert_eq!(
            extract_csv(csv).unwrap(),
            "termino traduccion motor engine freno, disco brake disc"
        );
    }

    #[test]
    fn csv_ragged_rows_and_blank_cells() {
        let csv = b"a,,c\nd\n,,\n";
        assert_eq!(extract_csv(csv).unwrap(), "a c d");
    }

    #[test]
    fn csv_empty() {
        assert_eq!(extract_csv(b"").unwrap(), "");
    }

    #[test]
    fn shared_strings_with_rich_text() {
        let xml = br#"<sst xmlns="x"><si><t>plain</t></si><si><r><t>ri</t></r><r><t xml:space="preserve">ch text</t></r><rPh><t>ignored</t></rPh></si><si/></sst>"#;
        assert_eq!(shared_strings(xml).unwrap(), vec!["plain", "rich text", ""]);
    }

    #[test]
    fn sheet_cells_resolve_types() {
        let shared = vec!["motor".to_string(), "engine".to_string()];
        let xml = br#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
            <row r="2"><c r="A2"><v>42.5</v></c><c r="B2" t="b"><v>1</v></c><c r="C2"><f>A2*2</f><v>85</v></c></row>
            <row r="3"><c r="A3" t="inlineStr"><is><t>inline value</t></is></c><c r="B3"/><c r="C3" t="s"><v>9</v></c></row>
        </sheetData></worksheet>"#;
        assert_eq!(
            sheet_cells(xml, &shared).unwrap(),
            vec!["motor", "engine", "42.5", "TRUE", "85", "inline value"]
        );
    }

    #[test]
    fn workbook_targets_resolve() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn sheet_order_follows_workbook() {
        let workbook = br#"<workbook xmlns:r="r"><sheets>
            <sheet name="Second" sheetId="2" r:id="rId2"/>
            <sheet name="First" sheetId="1" r:id="rId1"/>
        </sheets></workbook>"#;
        assert_eq!(sheet_rel_ids(workbook).unwrap(), vec!["rId2", "rId1"]);

        let rels = br#"<Relationships>
            <Relationship Id="rId1" Target="worksheets/sheet1.xml" Type="ws"/>
            <Relationship Id="rId2" Target="worksheets/sheet2.xml" Type="ws"/>
        </Relationships>"#;
        let targets = relationship_targets(rels).unwrap();
        assert_eq!(targets["rId2"], "worksheets/sheet2.xml");
    }
}
