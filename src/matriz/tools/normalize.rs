use std::sync::LazyLock;

use regex::Regex;

static SEGMENT_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n;]+").expect("segment delimiter pattern is valid"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("number pattern is valid"));

/// Uppercases the input and strips the accented Latin vowels and `Ñ` used
/// in the source spreadsheets, so place names compare byte-for-byte.
///
/// Empty input yields an empty string. Applying the function twice gives
/// the same result as applying it once.
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|ch| match ch {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Returns the second segment of a comment, splitting on runs of newlines
/// or semicolons; falls back to the first segment when there is only one,
/// and to the empty string otherwise. Segments past the second are
/// discarded.
///
/// This mirrors the authoring convention of the source spreadsheets, where
/// the first comment segment is an author header and the second carries
/// the content. It is a domain rule, not a general parsing rule, and the
/// boundary behaviour (a trailing delimiter produces an empty second
/// segment) is kept intact.
pub fn second_segment(text: &str) -> String {
    let parts: Vec<&str> = SEGMENT_DELIMITER.split(text).collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.trim().to_string(),
        [_, second, ..] => second.trim().to_string(),
    }
}

/// Extracts the first integer-or-decimal run from the text as a float.
/// Returns `None` when the text contains no digits.
pub fn extract_number(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
}
