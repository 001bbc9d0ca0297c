//! Mapping tagger tokens back onto transcript words.
//!
//! The tagger sees the lower-cased context window and tokenizes it its own
//! way: punctuation split off, clitics sometimes separated, the odd word
//! merged. Alignment walks the current sentence's words against the window's
//! tokens with a single cursor, comparing normalized text, and falls back to
//! tagging a word on its own when no token matches.

use std::ops::AddAssign;

use language_utils::text_cleanup::normalize_token;

use crate::error::Result;
use crate::special_cases::SpecialCases;
use crate::tagger::{TaggedUnit, Tagger};
use crate::transcript::{Annotation, Word};

/// How each word of a sentence got its annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    /// Matched the token at the cursor
    pub matched: usize,
    /// Matched a token further ahead
    pub recovered: usize,
    /// Tagged on its own
    pub fallback: usize,
    /// Handled without the tagger
    pub special: usize,
}

impl AlignmentStats {
    pub fn total(&self) -> usize {
        self.matched + self.recovered + self.fallback + self.special
    }
}

impl AddAssign for AlignmentStats {
    fn add_assign(&mut self, other: Self) {
        self.matched += other.matched;
        self.recovered += other.recovered;
        self.fallback += other.fallback;
        self.special += other.special;
    }
}

/// Annotate every word of a sentence from the tokens of its context window.
///
/// `unit` is the tagger's output for the whole window, so the cursor starts
/// at the first token of the previous sentence; those tokens are passed over
/// by the forward search. The only error is a failure of the fallback tagger
/// call.
pub fn align_sentence<T: Tagger + ?Sized>(
    words: &mut [Word],
    unit: &TaggedUnit,
    tagger: &T,
    special: &SpecialCases,
) -> Result<AlignmentStats> {
    let tokens = &unit.tokens;
    let mut stats = AlignmentStats::default();
    let mut cursor = 0;

    for word in words.iter_mut() {
        if special.handle(word).is_some() {
            stats.special += 1;
            continue;
        }

        while cursor < tokens.len() && tokens[cursor].is_skippable() {
            cursor += 1;
        }

        let target = normalize_token(&word.text);

        if cursor < tokens.len() && normalize_token(&tokens[cursor].text) == target {
            word.apply(tokens[cursor].annotation());
            cursor += 1;
            stats.matched += 1;
            continue;
        }

        let found = (cursor..tokens.len()).find(|&i| {
            !tokens[i].is_skippable() && normalize_token(&tokens[i].text) == target
        });
        match found {
            Some(i) => {
                word.apply(tokens[i].annotation());
                cursor = i + 1;
                stats.recovered += 1;
            }
            None => {
                cursor = tokens.len();
                word.apply(fallback_annotation(tagger, &word.text, &target)?);
                stats.fallback += 1;
            }
        }
    }

    Ok(stats)
}

/// Tag a word on its own. A word that normalizes to nothing, or that the
/// tagger returns no tokens for, gets an empty annotation.
fn fallback_annotation<T: Tagger + ?Sized>(
    tagger: &T,
    text: &str,
    normalized: &str,
) -> Result<Annotation> {
    log::debug!("No token matched {text:?}, tagging it alone");

    if normalized.is_empty() {
        return Ok(Annotation::empty(text));
    }

    let unit = tagger.tag(normalized)?;
    Ok(unit
        .tokens
        .first()
        .map(|token| token.annotation())
        .unwrap_or_else(|| Annotation::empty(text)))
}
