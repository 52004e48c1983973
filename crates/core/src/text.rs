use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold free text for comparison: NFKD, drop combining marks, lowercase.
///
/// `"Plástico Flexível"` becomes `"plastico flexivel"`. Whitespace is kept
/// as typed; see [`normalize_answer`] for prompt input.
pub fn normalize(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Trim surrounding whitespace, then [`normalize`].
pub fn normalize_answer(text: &str) -> String {
    normalize(text.trim())
}
