//! Sentence splitting over transcribed word streams.
//!
//! Transcripts arrive as flat lists of words, with punctuation glued onto the
//! word it follows (`"llueve."`) or standing on its own (`"."`). This library
//! cuts such a list into sentences and builds the neighbouring-sentence
//! windows used to give a tagger enough context for fragments.
//!
//! Sentences are returned as index ranges into the original slice, so callers
//! can keep mutating the words they came from.
//!
//! # Example
//!
//! ```
//! use sentence_splitter::{context_window, split_sentences};
//!
//! let words = vec!["Hoy", "llueve", ".", "Mañana", "no"];
//! let sentences = split_sentences(&words, |w| *w);
//! assert_eq!(sentences, vec![0..3, 3..5]);
//!
//! assert_eq!(context_window(&sentences, 1), 0..5);
//! ```

use std::ops::Range;

/// Characters that close a sentence when they end a word.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Returns true if the trimmed, lower-cased text ends with a sentence terminator.
pub fn ends_sentence(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    !text.is_empty() && text.ends_with(SENTENCE_TERMINATORS)
}

/// Split a word list into sentences.
///
/// A sentence is closed right after a word whose text ends in `.`, `?` or `!`.
/// Whatever remains after the last terminator becomes a final, unterminated
/// sentence. The ranges are non-empty, contiguous, and cover every index of
/// `items` exactly once.
///
/// # Arguments
///
/// * `items` - The words to split
/// * `text_fn` - Extracts the surface text of a word
pub fn split_sentences<T, F>(items: &[T], text_fn: F) -> Vec<Range<usize>>
where
    F: Fn(&T) -> &str,
{
    let mut sentences = Vec::new();
    let mut start = 0;

    for (index, item) in items.iter().enumerate() {
        if ends_sentence(text_fn(item)) {
            sentences.push(start..index + 1);
            start = index + 1;
        }
    }

    if start < items.len() {
        sentences.push(start..items.len());
    }

    sentences
}

/// The range covering the previous, current and next sentence around `index`.
///
/// Sentences produced by [`split_sentences`] are contiguous, so the window is
/// itself a single range. Missing neighbours at either end are simply left out.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `sentences`.
pub fn context_window(sentences: &[Range<usize>], index: usize) -> Range<usize> {
    let current = &sentences[index];
    let start = match index.checked_sub(1) {
        Some(previous) => sentences[previous].start,
        None => current.start,
    };
    let end = sentences
        .get(index + 1)
        .map_or(current.end, |next| next.end);
    start..end
}

/// Lower-case and space-join the text of the given items.
pub fn window_text<T, F>(items: &[T], text_fn: F) -> String
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .map(|item| text_fn(item).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(words: &[&str]) -> Vec<Vec<String>> {
        split_sentences(words, |w| *w)
            .into_iter()
            .map(|range| words[range].iter().map(|w| w.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_split_standalone_period() {
        let sentences = split(&["Hoy", "llueve", ".", "Mañana", "no"]);
        assert_eq!(
            sentences,
            vec![vec!["Hoy", "llueve", "."], vec!["Mañana", "no"]]
        );
    }

    #[test]
    fn test_split_attached_terminators() {
        let sentences = split(&["¿Vienes?", "Sí.", "¡Claro!", "vale"]);
        assert_eq!(
            sentences,
            vec![vec!["¿Vienes?"], vec!["Sí."], vec!["¡Claro!"], vec!["vale"]]
        );
    }

    #[test]
    fn test_split_trailing_whitespace_is_ignored() {
        let sentences = split(&["bueno. ", "y"]);
        assert_eq!(sentences, vec![vec!["bueno. "], vec!["y"]]);
    }

    #[test]
    fn test_split_no_terminator() {
        let sentences = split(&["eh", "pues", "nada"]);
        assert_eq!(sentences, vec![vec!["eh", "pues", "nada"]]);
    }

    #[test]
    fn test_split_empty() {
        let words: Vec<&str> = vec![];
        assert!(split_sentences(&words, |w| *w).is_empty());
    }

    #[test]
    fn test_split_covers_every_word_once() {
        let words = ["a", "b.", "c", "d?", "e", "f", "g!"];
        let ranges = split_sentences(&words, |w| *w);
        let covered: Vec<usize> = ranges.iter().flat_map(|r| r.clone()).collect();
        assert_eq!(covered, (0..words.len()).collect::<Vec<_>>());
        assert!(ranges.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_context_window_edges() {
        let sentences = vec![0..2, 2..5, 5..6];
        assert_eq!(context_window(&sentences, 0), 0..5);
        assert_eq!(context_window(&sentences, 1), 0..6);
        assert_eq!(context_window(&sentences, 2), 2..6);
    }

    #[test]
    fn test_context_window_single_sentence() {
        let sentences = vec![0..4];
        assert_eq!(context_window(&sentences, 0), 0..4);
    }

    #[test]
    fn test_window_text_lowercases_and_joins() {
        let words = ["Hoy", "LLUEVE", "."];
        assert_eq!(window_text(&words, |w| *w), "hoy llueve .");
    }
}
