use glossa_core::TermPair;

/// Plain-text glossary: one source term per line, no trailing newline.
pub fn render_txt(terms: &[TermPair]) -> String {
    terms
        .iter()
        .map(|t| t.source.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
