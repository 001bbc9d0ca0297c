//! The transcript record: one JSON file per recording.
//!
//! Only the fields the annotator reads or writes are typed. Everything else
//! (`filename`, `country_code`, `token_id`, ...) is carried through untouched
//! so downstream tools see the file they expect.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use language_utils::PartOfSpeech;
use language_utils::features::Morphology;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::speakers::SpeakerAttributes;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Speaker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spkid: Option<String>,
    /// Speaker code such as `lib-pm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A contiguous run of words by one speaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Word {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    /// `"1"` for words spoken in another language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign: Option<Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_morphology"
    )]
    pub morph: Option<Morphology>,
}

/// A present `morph` field always yields a feature bag; anything that is not an
/// object is read as an empty one.
fn lenient_morphology<'de, D>(deserializer: D) -> std::result::Result<Option<Morphology>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => Ok(Some(
            Morphology::deserialize(value).map_err(serde::de::Error::custom)?,
        )),
        _ => Ok(Some(Morphology::default())),
    }
}

/// The full set of fields the tagger contributes to a word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub pos: String,
    pub lemma: String,
    pub dep: String,
    pub head_text: String,
    pub morph: Morphology,
}

impl Annotation {
    /// The annotation given to a word nothing could be found for.
    pub fn empty(text: &str) -> Self {
        Self {
            lemma: text.to_string(),
            ..Self::default()
        }
    }
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_foreign(&self) -> bool {
        match &self.foreign {
            Some(Value::String(flag)) => flag == "1",
            Some(Value::Number(flag)) => flag.as_u64() == Some(1),
            Some(Value::Bool(flag)) => *flag,
            _ => false,
        }
    }

    /// True if the word already carries a part of speech or a feature bag.
    pub fn is_annotated(&self) -> bool {
        self.pos.is_some() || self.morph.is_some()
    }

    pub fn clear_annotation(&mut self) {
        self.pos = None;
        self.lemma = None;
        self.dep = None;
        self.head_text = None;
        self.morph = None;
    }

    pub fn apply(&mut self, annotation: Annotation) {
        self.pos = Some(annotation.pos);
        self.lemma = Some(annotation.lemma);
        self.dep = Some(annotation.dep);
        self.head_text = Some(annotation.head_text);
        self.morph = Some(annotation.morph);
    }

    /// The word's tag as a Universal Dependencies part of speech, if it is one.
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        self.pos.as_deref()?.parse().ok()
    }

    pub fn morphology(&self) -> Option<&Morphology> {
        self.morph.as_ref()
    }

    pub fn morphology_mut(&mut self) -> &mut Morphology {
        self.morph.get_or_insert_with(Morphology::default)
    }

    /// The lower-cased text of the word this one depends on.
    pub fn head_text_lowercase(&self) -> String {
        self.head_text.as_deref().unwrap_or_default().to_lowercase()
    }
}

impl Transcript {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the transcript as pretty-printed UTF-8 JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// True if any word in any segment has been annotated before.
    pub fn is_annotated(&self) -> bool {
        self.segments
            .iter()
            .flat_map(|s| &s.words)
            .any(Word::is_annotated)
    }

    pub fn clear_annotations(&mut self) {
        self.segments
            .iter_mut()
            .flat_map(|s| &mut s.words)
            .for_each(Word::clear_annotation);
    }

    /// The speaker code (`lib-pm`, `traf-pf`, ...) of the segment's speaker.
    pub fn speaker_code(&self, segment: &Segment) -> Option<&str> {
        let id = segment.speaker.as_deref()?;
        self.speakers
            .iter()
            .find(|s| s.spkid.as_deref() == Some(id))
            .and_then(|s| s.name.as_deref())
    }

    pub fn speaker_attributes(&self, segment: &Segment) -> SpeakerAttributes {
        SpeakerAttributes::from_code(self.speaker_code(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speakers::DiscourseMode;

    const SAMPLE: &str = r#"{
  "filename": "2023-01-01_ARG_radio.mp3",
  "country_code": "ARG",
  "speakers": [
    {
      "spkid": "S1",
      "name": "lib-pm"
    }
  ],
  "segments": [
    {
      "speaker": "S1",
      "words": [
        {
          "text": "Hoy",
          "start": 0.1,
          "end": 0.4,
          "token_id": "ARGabc12"
        },
        {
          "text": "weekend",
          "start": 0.4,
          "end": 0.9,
          "foreign": "1"
        }
      ]
    }
  ]
}"#;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let transcript: Transcript = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string_pretty(&transcript).unwrap();
        assert_eq!(json, SAMPLE);
    }

    #[test]
    fn test_foreign_flag() {
        let transcript: Transcript = serde_json::from_str(SAMPLE).unwrap();
        let words = &transcript.segments[0].words;
        assert!(!words[0].is_foreign());
        assert!(words[1].is_foreign());
    }

    #[test]
    fn test_unannotated_transcript() {
        let transcript: Transcript = serde_json::from_str(SAMPLE).unwrap();
        assert!(!transcript.is_annotated());
        assert_eq!(transcript.word_count(), 2);
    }

    #[test]
    fn test_morph_alone_counts_as_annotated() {
        let json = r#"{"segments": [{"words": [{"text": "x", "morph": {}}]}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert!(transcript.is_annotated());
    }

    #[test]
    fn test_malformed_morph_reads_as_empty() {
        let json = r#"{"segments": [{"words": [{"text": "x", "morph": "Tense=Past"}]}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        let word = &transcript.segments[0].words[0];
        assert_eq!(word.morphology(), Some(&Morphology::default()));
    }

    #[test]
    fn test_morph_values_of_the_wrong_type_do_not_fail_the_file() {
        let json = r#"{"segments": [{"words": [
            {"text": "x", "morph": {"Tense": ["Past"], "Person": 3}},
            {"text": "y", "morph": {"Tense": null}}
        ]}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        let words = &transcript.segments[0].words;
        assert_eq!(
            words[0].morphology(),
            Some(&Morphology::new().with("Tense", "Past"))
        );
        assert_eq!(words[1].morphology(), Some(&Morphology::default()));
        assert!(transcript.is_annotated());
    }

    #[test]
    fn test_clear_annotations_removes_every_field() {
        let mut word = Word::new("ha");
        word.apply(Annotation {
            pos: "AUX".to_string(),
            lemma: "haber".to_string(),
            dep: "aux".to_string(),
            head_text: "comido".to_string(),
            morph: Morphology::new().with("Tense", "Pres"),
        });
        let mut transcript = Transcript {
            segments: vec![Segment {
                words: vec![word],
                ..Segment::default()
            }],
            ..Transcript::default()
        };
        assert!(transcript.is_annotated());

        transcript.clear_annotations();
        assert!(!transcript.is_annotated());
        assert_eq!(transcript.segments[0].words[0], Word::new("ha"));
    }

    #[test]
    fn test_part_of_speech_ignores_non_ud_tags() {
        let mut word = Word::new("tu-");
        word.pos = Some("self-correction".to_string());
        assert_eq!(word.part_of_speech(), None);
        word.pos = Some("AUX".to_string());
        assert_eq!(word.part_of_speech(), Some(PartOfSpeech::Aux));
    }

    #[test]
    fn test_speaker_lookup() {
        let transcript: Transcript = serde_json::from_str(SAMPLE).unwrap();
        let segment = &transcript.segments[0];
        assert_eq!(transcript.speaker_code(segment), Some("lib-pm"));
        assert_eq!(
            transcript.speaker_attributes(segment).mode,
            DiscourseMode::Libre
        );

        let orphan = Segment {
            speaker: Some("S9".to_string()),
            ..Segment::default()
        };
        assert_eq!(transcript.speaker_code(&orphan), None);
        assert_eq!(
            transcript.speaker_attributes(&orphan).mode,
            DiscourseMode::Unknown
        );
    }
}
