use language_utils::PartOfSpeech;
use language_utils::features::{PastTenseType, Tense, VerbForm};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::transcript::Word;

/// Conjugated forms of *haber* that head a compound past, grouped by tense.
///
/// Entries are matched against the lower-cased head text of a participle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryLexicons {
    pub present: FxHashSet<String>,
    pub imperfect: FxHashSet<String>,
    pub future: FxHashSet<String>,
    pub conditional: FxHashSet<String>,
}

fn lexicon(forms: &[&str]) -> FxHashSet<String> {
    forms.iter().map(|form| form.to_string()).collect()
}

impl Default for AuxiliaryLexicons {
    fn default() -> Self {
        Self {
            // includes voseo and archaic forms
            present: lexicon(&[
                "he", "has", "ha", "hemos", "habéis", "han", "habés", "habís", "habemos",
            ]),
            imperfect: lexicon(&["había", "habías", "habíamos", "habíais", "habían"]),
            future: lexicon(&["habré", "habrás", "habrá", "habremos", "habréis", "habrán"]),
            conditional: lexicon(&["habría", "habrías", "habríamos", "habríais", "habrían"]),
        }
    }
}

impl AuxiliaryLexicons {
    /// The compound tense an auxiliary form introduces.
    pub fn lookup(&self, head: &str) -> Option<PastTenseType> {
        if self.present.contains(head) {
            Some(PastTenseType::PerfectoCompuesto)
        } else if self.imperfect.contains(head) {
            Some(PastTenseType::Pluscuamperfecto)
        } else if self.future.contains(head) {
            Some(PastTenseType::FuturoPerfecto)
        } else if self.conditional.contains(head) {
            Some(PastTenseType::CondicionalPerfecto)
        } else {
            None
        }
    }

    pub(crate) fn lowercased(self) -> Self {
        let lower = |set: FxHashSet<String>| -> FxHashSet<String> {
            set.into_iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            present: lower(self.present),
            imperfect: lower(self.imperfect),
            future: lower(self.future),
            conditional: lower(self.conditional),
        }
    }
}

pub struct PastTenseClassifier<'a> {
    lexicons: &'a AuxiliaryLexicons,
}

impl<'a> PastTenseClassifier<'a> {
    pub fn new(lexicons: &'a AuxiliaryLexicons) -> Self {
        Self { lexicons }
    }

    /// Label every past-tense word in the segment. Returns how many were labelled.
    pub fn classify_segment(&self, words: &mut [Word]) -> usize {
        let segment: &[Word] = words;
        let labels: Vec<(usize, PastTenseType)> = segment
            .iter()
            .enumerate()
            .filter_map(|(i, word)| self.classify(segment, i, word).map(|label| (i, label)))
            .collect();

        let count = labels.len();
        for (i, label) in labels {
            words[i].morphology_mut().past_tense_type = Some(label);
        }
        count
    }

    fn classify(&self, segment: &[Word], index: usize, word: &Word) -> Option<PastTenseType> {
        let morph = word.morphology()?;
        if !morph.has(Tense::Past) {
            return None;
        }

        if morph.has(VerbForm::Fin) {
            return Some(PastTenseType::PerfectoSimple);
        }
        if !morph.has(VerbForm::Part) {
            return Some(PastTenseType::PastOther);
        }

        if let Some(label) = self.lexicons.lookup(&word.head_text_lowercase()) {
            return Some(label);
        }

        // The tagger sometimes attaches the participle elsewhere while the
        // auxiliary still points at it.
        let participle = word.text.to_lowercase();
        let has_auxiliary = segment.iter().enumerate().any(|(j, other)| {
            j != index
                && other.part_of_speech() == Some(PartOfSpeech::Aux)
                && other.morphology().is_some_and(|m| m.has(Tense::Pres))
                && other.head_text_lowercase() == participle
        });

        Some(if has_auxiliary {
            PastTenseType::PerfectoCompuesto
        } else {
            PastTenseType::OtroCompuesto
        })
    }
}
