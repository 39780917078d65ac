use quick_xml::events::Event;
use quick_xml::Reader;

use super::office::local_name;
use super::ExtractionError;

/// Text of every `<source>` that is a direct child of a `<trans-unit>`,
/// joined with single spaces.
///
/// Elements are matched by local name so both plain XLIFF 1.2 and SDLXLIFF
/// (default namespace, `sdl:` extensions) work. Inline markup inside a
/// source (`<g>`, `<mrk>`, ...) contributes its text; `<seg-source>` is not
/// a `<source>` and is skipped.
pub fn extract_xliff(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    // Depth of the <source> currently being captured, if any.
    let mut capture_depth: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = local_name(e.name().as_ref()).to_vec();
                if capture_depth.is_none()
                    && name == b"source"
                    && stack.last().is_some_and(|parent| parent == b"trans-unit")
                {
                    capture_depth = Some(stack.len());
                    sources.push(String::new());
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
                if capture_depth == Some(stack.len()) {
                    capture_depth = None;
                }
            }
            Event::Text(e) if capture_depth.is_some() => {
                let text = e.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                if let Some(current) = sources.last_mut() {
                    current.push_str(&text);
                }
            }
            Event::CData(e) if capture_depth.is_some() => {
                if let Some(current) = sources.last_mut() {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sources.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trans_unit_sources() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file source-language="es" target-language="en" datatype="plaintext" original="a.txt">
    <body>
      <trans-unit id="1"><source>Bomba de agua</source><target>Water pump</target></trans-unit>
      <trans-unit id="2"><source>Válvula &amp; junta</source></trans-unit>
    </body>
  </file>
</xliff>"#;
        assert_eq!(
            extract_xliff(xml.as_bytes()).unwrap(),
            "Bomba de agua Válvula & junta"
        );
    }

    #[test]
    fn inline_markup_text_is_kept() {
        let xml = br#"<xliff><file><body>
            <trans-unit id="1"><source>Use the <g id="1">torque</g> wrench</source></trans-unit>
        </body></file></xliff>"#;
        assert_eq!(extract_xliff(xml).unwrap(), "Use the torque wrench");
    }

    #[test]
    fn sdlxliff_seg_source_is_skipped() {
        let xml = br#"<xliff xmlns:sdl="http://sdl.com/FileTypes/SdlXliff/1.0"><file><body>
            <trans-unit id="a">
              <source>Freno</source>
              <seg-source><mrk mtype="seg" mid="1">Freno</mrk></seg-source>
              <target><mrk mtype="seg" mid="1">Brake</mrk></target>
            </trans-unit>
        </body></file></xliff>"#;
        assert_eq!(extract_xliff(xml).unwrap(), "Freno");
    }

    #[test]
    fn source_outside_trans_unit_is_ignored() {
        let xml = br#"<xliff><file><header><source>header note</source></header><body>
            <trans-unit id="1"><source>eje</source></trans-unit>
        </body></file></xliff>"#;
        assert_eq!(extract_xliff(xml).unwrap(), "eje");
    }

    #[test]
    fn no_trans_units_is_empty() {
        assert_eq!(extract_xliff(b"<xliff/>").unwrap(), "");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(extract_xliff(b"<xliff><file></xliff>").is_err());
    }
}
