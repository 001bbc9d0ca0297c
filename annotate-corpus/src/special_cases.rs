use language_utils::PartOfSpeech;
use language_utils::text_cleanup::is_self_interruption;
use rustc_hash::FxHashSet;

use crate::config::AnnotateConfig;
use crate::transcript::{Annotation, Word};

/// Words annotated without consulting the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCase {
    /// Spoken in another language; left without annotation
    Foreign,
    /// Cut off by the speaker (`tu-`); only the part of speech is set
    SelfInterruption,
    /// A filler such as `eeh`
    Interjection,
}

pub struct SpecialCases {
    interjections: FxHashSet<String>,
    self_correction_tag: String,
}

impl SpecialCases {
    pub fn from_config(config: &AnnotateConfig) -> Self {
        Self {
            interjections: config
                .interjections
                .iter()
                .map(|form| form.to_lowercase())
                .collect(),
            self_correction_tag: config.self_correction_tag.clone(),
        }
    }

    /// Checked in order: foreign flag, self-interruption, interjection.
    pub fn detect(&self, word: &Word) -> Option<SpecialCase> {
        if word.is_foreign() {
            Some(SpecialCase::Foreign)
        } else if is_self_interruption(&word.text) {
            Some(SpecialCase::SelfInterruption)
        } else if self.interjections.contains(&word.text.to_lowercase()) {
            Some(SpecialCase::Interjection)
        } else {
            None
        }
    }

    pub fn apply(&self, case: SpecialCase, word: &mut Word) {
        match case {
            SpecialCase::Foreign => {}
            SpecialCase::SelfInterruption => {
                word.pos = Some(self.self_correction_tag.clone());
            }
            SpecialCase::Interjection => {
                let annotation = Annotation {
                    pos: PartOfSpeech::Intj.tag().to_string(),
                    ..Annotation::empty(&word.text)
                };
                word.apply(annotation);
            }
        }
    }

    /// Annotate the word if it is a special case. Returns the case that applied.
    pub fn handle(&self, word: &mut Word) -> Option<SpecialCase> {
        let case = self.detect(word)?;
        self.apply(case, word);
        Some(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn special_cases() -> SpecialCases {
        SpecialCases::from_config(&AnnotateConfig::default())
    }

    #[test]
    fn test_foreign_word_left_alone() {
        let mut word = Word::new("weekend");
        word.foreign = Some(Value::String("1".to_string()));
        assert_eq!(special_cases().handle(&mut word), Some(SpecialCase::Foreign));
        assert!(!word.is_annotated());
    }

    #[test]
    fn test_foreign_wins_over_self_interruption() {
        let mut word = Word::new("wee-");
        word.foreign = Some(Value::String("1".to_string()));
        assert_eq!(special_cases().detect(&word), Some(SpecialCase::Foreign));
    }

    #[test]
    fn test_self_interruption_only_sets_pos() {
        let mut word = Word::new("tu-");
        assert_eq!(
            special_cases().handle(&mut word),
            Some(SpecialCase::SelfInterruption)
        );
        assert_eq!(word.pos.as_deref(), Some("self-correction"));
        assert_eq!(word.lemma, None);
        assert_eq!(word.morph, None);
    }

    #[test]
    fn test_interjection_is_case_insensitive() {
        let mut word = Word::new("Eeh");
        assert_eq!(
            special_cases().handle(&mut word),
            Some(SpecialCase::Interjection)
        );
        assert_eq!(word.pos.as_deref(), Some("INTJ"));
        assert_eq!(word.lemma.as_deref(), Some("Eeh"));
        assert_eq!(word.dep.as_deref(), Some(""));
        assert_eq!(word.head_text.as_deref(), Some(""));
        assert!(word.morphology().is_some_and(|m| m.is_empty()));
    }

    #[test]
    fn test_ordinary_word() {
        let mut word = Word::new("llueve");
        assert_eq!(special_cases().handle(&mut word), None);
        assert!(!word.is_annotated());
    }
}
