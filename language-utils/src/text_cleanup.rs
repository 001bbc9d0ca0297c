//! Token normalization for comparing transcript words with tagger output
//!
//! Transcribers glue punctuation onto words (`"llueve."`, `"¿vienes"`) while
//! taggers usually split it off. Both sides are brought to the same shape
//! before they are compared.

/// Returns true for characters stripped from the edges of a token:
/// ASCII punctuation plus the Spanish inverted marks.
pub fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '¿' | '¡')
}

/// Remove punctuation from both ends of a token, leaving inner punctuation alone.
pub fn strip_punctuation(text: &str) -> &str {
    text.trim_matches(is_edge_punctuation)
}

/// Lower-case a token and strip punctuation from its edges.
///
/// This is the key on which transcript words and tagger tokens are matched.
pub fn normalize_token(text: &str) -> String {
    strip_punctuation(&text.to_lowercase()).to_string()
}

/// Returns true if the word was cut off mid-way by the speaker (`"tu-"`).
pub fn is_self_interruption(text: &str) -> bool {
    text.ends_with('-')
}
