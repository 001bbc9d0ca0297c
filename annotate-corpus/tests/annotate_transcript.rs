use std::path::Path;

use annotate_corpus::annotate::Annotator;
use annotate_corpus::config::AnnotateConfig;
use annotate_corpus::error::{AnnotateError, Result};
use annotate_corpus::progress::Progress;
use annotate_corpus::tagger::{TaggedToken, TaggedUnit, Tagger};
use annotate_corpus::{FileOutcome, Transcript};
use language_utils::features::Morphology;
use serde_json::{Value, json};

/// A tiny rule-based tagger: splits trailing punctuation off, always splits
/// the contraction `del`, and knows a handful of verb forms.
struct FakeTagger;

fn known(word: &str) -> (&'static str, &'static str, Morphology) {
    match word {
        "había" => (
            "AUX",
            "comido",
            Morphology::new().with("Tense", "Imp").with("VerbForm", "Fin"),
        ),
        "comido" => (
            "VERB",
            "había",
            Morphology::new().with("Tense", "Past").with("VerbForm", "Part"),
        ),
        "ha" => ("AUX", "llovido", Morphology::new().with("Tense", "Pres")),
        "llovido" => (
            "VERB",
            "ha",
            Morphology::new().with("Tense", "Past").with("VerbForm", "Part"),
        ),
        "va" => ("AUX", "llover", Morphology::new().with("Tense", "Pres")),
        "iba" => ("AUX", "nevar", Morphology::new().with("Tense", "Imp")),
        "a" => ("ADP", "", Morphology::new()),
        "llover" | "nevar" => ("VERB", "", Morphology::new().with("VerbForm", "Inf")),
        "de" => ("ADP", "", Morphology::new()),
        "el" => ("DET", "", Morphology::new()),
        _ => ("NOUN", "", Morphology::new()),
    }
}

impl Tagger for FakeTagger {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        let mut tokens = Vec::new();
        for piece in text.split_whitespace() {
            let core = piece.trim_end_matches(['.', ',', '?', '!']);
            let parts: Vec<&str> = if core == "del" { vec!["de", "el"] } else { vec![core] };
            for part in parts.into_iter().filter(|p| !p.is_empty()) {
                let (pos, head, morph) = known(part);
                tokens.push(TaggedToken {
                    text: part.to_string(),
                    pos: pos.to_string(),
                    lemma: part.to_string(),
                    dep: "dep".to_string(),
                    head_text: head.to_string(),
                    morph,
                    ..TaggedToken::default()
                });
            }
            for punct in piece[core.len()..].chars() {
                tokens.push(TaggedToken {
                    text: punct.to_string(),
                    is_punct: true,
                    pos: "PUNCT".to_string(),
                    lemma: punct.to_string(),
                    ..TaggedToken::default()
                });
            }
        }
        Ok(TaggedUnit { tokens })
    }
}

struct OfflineTagger;

impl Tagger for OfflineTagger {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        Err(AnnotateError::Tagger {
            text: text.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn word(text: &str) -> Value {
    json!({"text": text, "start": 0.0, "end": 0.5})
}

fn sample() -> Value {
    json!({
        "filename": "2023-05-01_ESP_radio.mp3",
        "country_code": "ESP",
        "speakers": [
            {"spkid": "S1", "name": "lib-pm"},
            {"spkid": "S2", "name": "traf-pf"}
        ],
        "segments": [
            {
                "speaker": "S1",
                "words": [word("Eeh"), word("había"), word("comido"), word("mucho.")]
            },
            {
                "speaker": "S2",
                "words": [
                    word("Ha"), word("llovido."),
                    word("Va"), word("a"), word("llover"),
                    word("y"), word("iba"), word("a"), word("nevar")
                ]
            },
            {
                "speaker": "S1",
                "words": [
                    {"text": "weekend", "start": 0.0, "end": 0.5, "foreign": "1"},
                    word("tu-"),
                    word("bueno"),
                    word("del")
                ]
            }
        ]
    })
}

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("2023-05-01_ESP_radio.json");
    std::fs::write(&path, serde_json::to_string_pretty(&sample()).unwrap()).unwrap();
    path
}

fn annotate(path: &Path, overwrite: bool) -> Result<FileOutcome> {
    let config = AnnotateConfig::default();
    let annotator = Annotator::new(&FakeTagger, &config);
    annotator.annotate_file(path, overwrite, &mut Progress::hidden(17, 2500))
}

fn saved(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn annotates_every_word_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let outcome = annotate(&path, false).unwrap();
    let FileOutcome::Annotated(summary) = outcome else {
        panic!("expected the file to be annotated, got {outcome:?}");
    };
    assert_eq!(summary.words, 17);
    assert_eq!(summary.past_tenses, 2);
    assert_eq!(summary.futures, 2);

    let json = saved(&path);
    assert_eq!(json["filename"], "2023-05-01_ESP_radio.mp3");

    let original = sample();
    for (segment, expected) in json["segments"]
        .as_array()
        .unwrap()
        .iter()
        .zip(original["segments"].as_array().unwrap())
    {
        let texts: Vec<&Value> = segment["words"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| &w["text"])
            .collect();
        let expected: Vec<&Value> = expected["words"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| &w["text"])
            .collect();
        assert_eq!(texts, expected);
    }
}

#[test]
fn labels_compound_pasts_and_analytic_futures() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    annotate(&path, false).unwrap();

    let json = saved(&path);
    let first = &json["segments"][0]["words"];
    assert_eq!(first[2]["morph"]["Past_Tense_Type"], "Pluscuamperfecto");
    assert_eq!(first[2]["head_text"], "había");
    assert!(first[1]["morph"].get("Past_Tense_Type").is_none());

    let second = &json["segments"][1]["words"];
    assert_eq!(second[1]["morph"]["Past_Tense_Type"], "PerfectoCompuesto");
    assert_eq!(second[4]["morph"]["Future_Type"], "analyticalFuture");
    assert_eq!(second[8]["morph"]["Future_Type"], "analyticalFuture_past");
    assert_eq!(second[4]["morph"]["VerbForm"], json!(["Inf"]));
}

#[test]
fn handles_special_words_and_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    annotate(&path, false).unwrap();

    let json = saved(&path);
    let eeh = &json["segments"][0]["words"][0];
    assert_eq!(eeh["pos"], "INTJ");
    assert_eq!(eeh["lemma"], "Eeh");
    assert_eq!(eeh["dep"], "");
    assert_eq!(eeh["morph"], json!({}));

    let last = &json["segments"][2]["words"];
    assert_eq!(last[0]["foreign"], "1");
    assert!(last[0].get("pos").is_none());
    assert!(last[0].get("morph").is_none());

    assert_eq!(last[1]["pos"], "self-correction");
    assert!(last[1].get("lemma").is_none());

    assert_eq!(last[2]["pos"], "NOUN");
    // "del" is split by the tagger; tagged alone, its first token is used
    assert_eq!(last[3]["lemma"], "de");
    assert_eq!(last[3]["pos"], "ADP");
}

#[test]
fn second_run_skips_and_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    annotate(&path, false).unwrap();
    let first = std::fs::read(&path).unwrap();

    assert_eq!(annotate(&path, false).unwrap(), FileOutcome::Skipped);
    assert_eq!(std::fs::read(&path).unwrap(), first);

    // overwriting starts from scratch and produces the same file
    assert!(matches!(
        annotate(&path, true).unwrap(),
        FileOutcome::Annotated(_)
    ));
    assert_eq!(std::fs::read(&path).unwrap(), first);
}

#[test]
fn tagger_failure_leaves_file_unwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let before = std::fs::read(&path).unwrap();

    let config = AnnotateConfig::default();
    let annotator = Annotator::new(&OfflineTagger, &config);
    let result = annotator.annotate_file(&path, false, &mut Progress::hidden(17, 2500));

    assert!(matches!(result, Err(AnnotateError::Tagger { .. })));
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(!Transcript::load(&path).unwrap().is_annotated());
}
