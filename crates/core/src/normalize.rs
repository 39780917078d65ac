//! Term cleanup and casing policy.
//!
//! Every source term goes through [`normalize_term`] before deduplication so
//! that the output of different providers compares the same way.

use once_cell::sync::Lazy;
use regex::Regex;

/// A stray language tag echoed by the model, e.g. `DE: Wert` or `EN - value`.
/// The separator is mandatory so acronyms such as `NASA` or `ABS-Sensor`
/// survive untouched.
static LANG_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,3}(?:\s*:|\s+-)\s*").unwrap());

/// Characters stripped from both ends of a raw term: list bullets, dashes,
/// numbering, quotes, brackets and any other punctuation.
fn is_edge_noise(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_digit()
        || c.is_ascii_punctuation()
        || matches!(
            c,
            '•' | '·' | '—' | '–' | '‐' | '‑' | '…' | '¿' | '¡' | '«' | '»' | '‹' | '›'
                | '“' | '”' | '„' | '‘' | '’' | '‚' | '′' | '″' | '§' | '¶'
        )
}

/// Clean a raw term string.
///
/// 1. Strip bullets, dashes, numbering, punctuation and whitespace at both ends.
/// 2. Drop a leading 2–3 letter language-code tag.
/// 3. Keep all-caps terms (acronyms) and capitalized multi-word names as-is;
///    lowercase everything else.
pub fn normalize_term(raw: &str) -> String {
    let trimmed = raw.trim_matches(is_edge_noise);
    let stripped = LANG_PREFIX.replace(trimmed, "");
    let term = stripped.trim_matches(is_edge_noise);

    if is_acronym(term) || is_proper_name(term) {
        term.to_string()
    } else {
        term.to_lowercase()
    }
}

/// At least one uppercase letter and no lowercase ones.
fn is_acronym(term: &str) -> bool {
    term.chars().any(char::is_uppercase) && !term.chars().any(char::is_lowercase)
}

/// Two or more whitespace-separated words, each an uppercase letter followed
/// only by lowercase letters ("New York", "Banco Central").
fn is_proper_name(term: &str) -> bool {
    let mut words = 0;
    for word in term.split_whitespace() {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {}
            _ => return false,
        }
        if !chars.all(char::is_lowercase) {
            return false;
        }
        words += 1;
    }
    words >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullet_and_language_tag() {
        assert_eq!(normalize_term("  - DE: Wert"), "wert");
        assert_eq!(normalize_term("EN - value"), "value");
    }

    #[test]
    fn keeps_acronyms() {
        assert_eq!(normalize_term("NASA"), "NASA");
        assert_eq!(normalize_term("ABS-Sensor"), "abs-sensor");
        assert_eq!(normalize_term("* CNC."), "CNC");
    }

    #[test]
    fn keeps_capitalized_multi_word_names() {
        assert_eq!(normalize_term("New York"), "New York");
        assert_eq!(normalize_term("1. Banco Central"), "Banco Central");
    }

    #[test]
    fn lowercases_single_capitalized_word() {
        assert_eq!(normalize_term("Motor"), "motor");
    }

    #[test]
    fn lowercases_mixed_case() {
        assert_eq!(normalize_term("Válvula de Escape"), "válvula de escape");
        assert_eq!(normalize_term("iPhone"), "iphone");
    }

    #[test]
    fn strips_numbering() {
        assert_eq!(normalize_term("12) cojinete;"), "cojinete");
        assert_eq!(normalize_term("3. — tornillo"), "tornillo");
        assert_eq!(normalize_term("• engranaje"), "engranaje");
    }

    #[test]
    fn strips_quotes_brackets_and_spanish_marks() {
        assert_eq!(normalize_term("\"motor\""), "motor");
        assert_eq!(normalize_term("(bomba)"), "bomba");
        assert_eq!(normalize_term("¿válvula?"), "válvula");
        assert_eq!(normalize_term("freno!"), "freno");
        assert_eq!(normalize_term("[rueda]"), "rueda");
        assert_eq!(normalize_term("«junta tórica»"), "junta tórica");
        assert_eq!(normalize_term("“Banco Central”"), "Banco Central");
        assert_eq!(normalize_term("'cigüeñal'"), "cigüeñal");
    }

    #[test]
    fn inner_punctuation_is_kept() {
        assert_eq!(normalize_term("(ABS-Sensor)"), "abs-sensor");
        assert_eq!(normalize_term("\"DE: Wert\""), "wert");
        assert_eq!(normalize_term("I+D"), "I+D");
    }

    #[test]
    fn tag_alone_is_kept_as_acronym() {
        assert_eq!(normalize_term("DE:"), "DE");
    }

    #[test]
    fn empty_and_noise_only() {
        assert_eq!(normalize_term(""), "");
        assert_eq!(normalize_term(" - 42. "), "");
    }
}
