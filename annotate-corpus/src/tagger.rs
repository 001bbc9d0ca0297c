//! The boundary to the external part-of-speech tagger.
//!
//! The annotator never tags anything itself. It hands a string to a [`Tagger`]
//! and gets back spaCy-style tokens: text, punctuation/whitespace flags,
//! part of speech, lemma, dependency label, head text and a feature bag.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use language_utils::features::Morphology;
use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, Result};
use crate::transcript::Annotation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    #[serde(default)]
    pub is_punct: bool,
    #[serde(default)]
    pub is_space: bool,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub dep: String,
    /// Text of the syntactic head, already resolved by the tagger
    #[serde(default)]
    pub head_text: String,
    #[serde(default)]
    pub morph: Morphology,
}

impl TaggedToken {
    /// Punctuation and whitespace tokens never correspond to a transcript word.
    pub fn is_skippable(&self) -> bool {
        self.is_punct || self.is_space
    }

    pub fn annotation(&self) -> Annotation {
        Annotation {
            pos: self.pos.clone(),
            lemma: self.lemma.clone(),
            dep: self.dep.clone(),
            head_text: self.head_text.clone(),
            morph: self.morph.clone(),
        }
    }
}

/// Everything the tagger returned for one input string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedUnit {
    pub tokens: Vec<TaggedToken>,
}

/// An opaque tagging capability.
///
/// Tagging a single word must behave like tagging a longer string restricted
/// to that one token. Failures are returned, never swallowed: a transcript
/// that cannot be tagged must not be written half-annotated.
pub trait Tagger {
    fn tag(&self, text: &str) -> Result<TaggedUnit>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        (**self).tag(text)
    }
}

#[derive(Serialize)]
struct TagRequest<'a> {
    text: &'a str,
}

/// Tags text through an HTTP tagging service.
///
/// The service receives `{"text": "..."}` and answers with
/// `{"tokens": [...]}` in the [`TaggedToken`] shape.
pub struct HttpTagger {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTagger {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Tagger for HttpTagger {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        let response = self
            .client
            .post(&self.url)
            .json(&TagRequest { text })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnnotateError::Tagger {
                text: text.to_string(),
                reason: format!("{status}: {}", response.text().unwrap_or_default()),
            });
        }
        Ok(response.json::<TaggedUnit>()?)
    }
}

/// One line of the tagger cache file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaggedSentence {
    sentence: String,
    tokens: Vec<TaggedToken>,
}

/// Wraps a tagger with an append-only JSONL cache.
///
/// Strings already in the cache are answered without calling the inner
/// tagger; new results are appended as they come in, so an interrupted run
/// keeps everything it tagged so far.
pub struct CachedTagger<T> {
    inner: T,
    cache: RefCell<HashMap<String, TaggedUnit>>,
    writer: RefCell<BufWriter<File>>,
}

impl<T: Tagger> CachedTagger<T> {
    pub fn open(inner: T, cache_file: &Path) -> Result<Self> {
        let mut cache = HashMap::new();
        if cache_file.exists() {
            let reader = BufReader::new(File::open(cache_file)?);
            for line in reader.lines().map_while(std::io::Result::ok) {
                if let Ok(tagged) = serde_json::from_str::<TaggedSentence>(&line) {
                    cache.insert(
                        tagged.sentence,
                        TaggedUnit {
                            tokens: tagged.tokens,
                        },
                    );
                }
            }
            log::info!(
                "Loaded {} cached tagger results from {}",
                cache.len(),
                cache_file.display()
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(cache_file)?;

        Ok(Self {
            inner,
            cache: RefCell::new(cache),
            writer: RefCell::new(BufWriter::new(file)),
        })
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

impl<T: Tagger> Tagger for CachedTagger<T> {
    fn tag(&self, text: &str) -> Result<TaggedUnit> {
        if let Some(unit) = self.cache.borrow().get(text) {
            return Ok(unit.clone());
        }

        let unit = self.inner.tag(text)?;

        let line = serde_json::to_string(&TaggedSentence {
            sentence: text.to_string(),
            tokens: unit.tokens.clone(),
        })?;
        let mut writer = self.writer.borrow_mut();
        writeln!(writer, "{line}")?;
        writer.flush()?;

        self.cache
            .borrow_mut()
            .insert(text.to_string(), unit.clone());
        Ok(unit)
    }
}
