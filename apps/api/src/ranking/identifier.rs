//! Candidate Identifier: best-effort display name for a résumé.
//!
//! Rule chain, first match wins:
//! 1. a labeled name in the text (`Nombre completo: ...`),
//! 2. the file name, minus timestamp prefix, `cv`/`hoja`/`vida` label and extension.
//!
//! Names are shortened to first name + first surname and accent-folded.
//! Surname particles ("de la Cruz") are not recognised; the short form simply
//! keeps the first two tokens.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::ranking::normalizer::fold_accents;

/// Tokens kept in a shortened name.
const SHORT_NAME_TOKENS: usize = 2;

fn labeled_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"nombre\s*(?:completo)?:\s*([a-záéíóúñ\s]+?)(?:\n|código|correo|teléfono|email)")
            .expect("labeled name pattern is valid")
    })
}

fn timestamp_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+_").expect("timestamp pattern is valid"))
}

fn label_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(cv|hoja|vida)_?").expect("label pattern is valid"))
}

/// Derives the display name for a candidate. Never fails.
pub fn identify(text: &str, file_name: &str) -> String {
    name_from_text(text).unwrap_or_else(|| name_from_file(file_name))
}

/// Looks for a `nombre[ completo]: <letters>` label in the lowercased text.
pub fn name_from_text(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let captured = labeled_name_pattern()
        .captures(&lowered)?
        .get(1)?
        .as_str()
        .trim();
    if captured.is_empty() {
        return None;
    }
    Some(shorten(&fold_accents(&title_case(captured))))
}

/// Builds a name from the file name. Falls back to the bare stem when the
/// cleanup leaves nothing (e.g. `cv.pdf`).
pub fn name_from_file(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    let without_stamp = timestamp_prefix().replace(&stem, "");
    let without_label = label_prefix().replace(&without_stamp, "");
    let spaced = without_label.replace('_', " ");

    let name = shorten(&fold_accents(&title_case(&spaced)));
    if name.is_empty() {
        stem
    } else {
        name
    }
}

/// Title-cases every run of letters: first letter upper, the rest lower.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_was_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_was_letter = true;
        } else {
            out.push(c);
            previous_was_letter = false;
        }
    }
    out
}

/// Collapses whitespace and keeps at most the first two tokens.
fn shorten(name: &str) -> String {
    name.split_whitespace()
        .take(SHORT_NAME_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}
