//! Instruction text sent with every block.
//!
//! Both wordings ask for one `term<TAB>translation` pair per line, no
//! leading bullets or dashes, lowercase except proper nouns and acronyms,
//! and no generic phrases. They differ only in how many terms they ask for.

use glossa_core::{LanguagePair, PromptStyle};

/// Build the single-turn prompt for `block`.
pub fn build_prompt(block: &str, langs: &LanguagePair, style: PromptStyle) -> String {
    let volume = match style {
        PromptStyle::Ratio => {
            "Extrae aproximadamente un término por cada 100 palabras del texto, \
             solo los más relevantes (tecnología, técnica, piezas, etc.)"
        }
        PromptStyle::Relevant => "Solo términos relevantes (tecnología, técnica, piezas, etc.)",
    };

    format!(
        "Extrae términos clave del siguiente texto en {src} y sugiere su traducción al {tgt}. \
         Un término por línea, separados por tabulador. {volume}, \
         sin frases genéricas. Evita guiones u otros símbolos al inicio. \
         Usa minúsculas salvo nombres propios o siglas.\n\nTexto:\n{block}",
        src = langs.source,
        tgt = langs.target,
    )
}
