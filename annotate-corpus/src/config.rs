use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, Result};
use crate::past_tense::AuxiliaryLexicons;

/// Tunable lexicons and constants of an annotation run.
///
/// Every field has a default, so a config file only needs to name what it
/// overrides:
///
/// ```json
/// {"interjections": ["eeh", "mmm"], "progress_step": 1000}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    pub auxiliaries: AuxiliaryLexicons,
    /// Filler forms tagged `INTJ` without asking the tagger
    pub interjections: Vec<String>,
    /// Part of speech given to self-interrupted words (`tu-`)
    pub self_correction_tag: String,
    /// Words between two progress messages
    pub progress_step: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            auxiliaries: AuxiliaryLexicons::default(),
            interjections: vec!["eeh".to_string()],
            self_correction_tag: "self-correction".to_string(),
            progress_step: 2500,
        }
    }
}

impl AnnotateConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: AnnotateConfig = serde_json::from_reader(reader)?;
        config.validated()
    }

    /// Lower-case the lexicons and reject values the pipeline cannot run with.
    pub fn validated(self) -> Result<Self> {
        if self.progress_step == 0 {
            return Err(AnnotateError::Config(
                "progress_step must be greater than zero".to_string(),
            ));
        }
        if self.self_correction_tag.is_empty() {
            return Err(AnnotateError::Config(
                "self_correction_tag must not be empty".to_string(),
            ));
        }

        Ok(Self {
            auxiliaries: self.auxiliaries.lowercased(),
            interjections: self
                .interjections
                .into_iter()
                .map(|form| form.to_lowercase())
                .collect(),
            ..self
        })
    }
}
