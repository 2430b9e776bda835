//! Text Normalizer: raw extracted text to a cleaned, space-joined token stream.

/// Tokens this short (in characters) or shorter carry no signal and are dropped.
const MAX_DROPPED_TOKEN_CHARS: usize = 2;

/// Spanish function words: articles, prepositions, conjunctions, common pronouns.
pub const STOPWORDS: &[&str] = &[
    "el", "la", "de", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para", "con", "no",
    "una", "su", "al", "es", "lo", "como", "más", "o", "pero", "sus", "le", "ya", "fue", "este",
    "ha", "si", "porque", "esta", "son", "entre", "cuando", "muy", "sin", "sobre", "también",
    "me", "hasta", "donde", "quien", "desde", "nos", "durante", "todos", "uno", "les", "ni",
    "contra", "otros",
];

/// Letters kept besides ASCII `a-z`.
const ACCENTED_LETTERS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ñ'];

/// Lowercases, blanks out everything but letters and whitespace, then drops
/// short tokens and stopwords. Pure and deterministic.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let letters_only: String = lowered
        .chars()
        .map(|c| if is_kept_char(c) { c } else { ' ' })
        .collect();

    letters_only
        .split_whitespace()
        .filter(|token| token.chars().count() > MAX_DROPPED_TOKEN_CHARS)
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Maps the accented letters the normalizer keeps to their plain ASCII base.
/// Other characters pass through unchanged.
pub fn fold_accents(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' => 'u',
        'ñ' => 'n',
        'Á' => 'A',
        'É' => 'E',
        'Í' => 'I',
        'Ó' => 'O',
        'Ú' => 'U',
        'Ñ' => 'N',
        other => other,
    }
}

fn is_kept_char(c: char) -> bool {
    c.is_ascii_lowercase() || ACCENTED_LETTERS.contains(&c) || c.is_whitespace()
}
