//! Part-of-speech annotation for transcribed Spanish radio recordings.
//!
//! Each recording is a JSON transcript of speaker segments and timed words.
//! The annotator splits every segment into sentences, tags each sentence
//! together with its neighbours, aligns the tagger's tokens back onto the
//! transcribed words, and then labels compound past tenses and *ir a* +
//! infinitive futures.

pub mod align;
pub mod annotate;
pub mod config;
pub mod error;
pub mod future;
pub mod past_tense;
pub mod progress;
pub mod special_cases;
pub mod speakers;
pub mod tagger;
pub mod transcript;

pub use annotate::{Annotator, FileOutcome};
pub use config::AnnotateConfig;
pub use error::{AnnotateError, Result};
pub use tagger::{CachedTagger, HttpTagger, Tagger};
pub use transcript::Transcript;
