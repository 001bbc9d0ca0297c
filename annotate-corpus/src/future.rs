use language_utils::PartOfSpeech;
use language_utils::features::{FutureType, Tense, VerbForm};

use crate::transcript::Word;

/// The future introduced by an auxiliary in this tense, if any.
fn future_type(auxiliary: &Word) -> Option<FutureType> {
    if auxiliary.part_of_speech() != Some(PartOfSpeech::Aux) {
        return None;
    }
    let morph = auxiliary.morphology()?;
    if !morph.has_feature::<Tense>() {
        return None;
    }
    if morph.has(Tense::Pres) {
        Some(FutureType::Analytical)
    } else if morph.has(Tense::Imp) {
        Some(FutureType::AnalyticalPast)
    } else {
        None
    }
}

fn is_preposition_a(word: &Word) -> bool {
    word.text.to_lowercase() == "a" && word.part_of_speech() == Some(PartOfSpeech::Adp)
}

fn is_infinitive(word: &Word) -> bool {
    word.part_of_speech() == Some(PartOfSpeech::Verb)
        && word.morphology().is_some_and(|m| m.has(VerbForm::Inf))
}

/// Mark *ir a* + infinitive (`va a llover`, `iba a llover`) on the infinitive.
///
/// Scans every run of three consecutive words in the segment. Returns the
/// number of infinitives marked.
pub fn detect_analytic_futures(words: &mut [Word]) -> usize {
    let matches: Vec<(usize, FutureType)> = words
        .windows(3)
        .enumerate()
        .filter_map(|(i, window)| {
            let [auxiliary, preposition, verb] = window else {
                return None;
            };
            if !is_preposition_a(preposition) || !is_infinitive(verb) {
                return None;
            }
            future_type(auxiliary).map(|future| (i + 2, future))
        })
        .collect();

    let count = matches.len();
    for (i, future) in matches {
        words[i].morphology_mut().future_type = Some(future);
    }
    count
}
