use std::path::Path;

use indexmap::IndexMap;
use sentence_splitter::{context_window, split_sentences, window_text};

use crate::align::{AlignmentStats, align_sentence};
use crate::config::AnnotateConfig;
use crate::error::Result;
use crate::future::detect_analytic_futures;
use crate::past_tense::PastTenseClassifier;
use crate::progress::Progress;
use crate::special_cases::SpecialCases;
use crate::speakers::DiscourseMode;
use crate::tagger::{TaggedUnit, Tagger};
use crate::transcript::{Transcript, Word};

/// What a single annotation pass did to a transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub words: usize,
    pub alignment: AlignmentStats,
    pub past_tenses: usize,
    pub futures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Annotated(AnnotationSummary),
    /// The file already carried annotations and overwriting was off
    Skipped,
}

pub struct Annotator<'a, T: Tagger + ?Sized> {
    tagger: &'a T,
    config: &'a AnnotateConfig,
    special: SpecialCases,
}

impl<'a, T: Tagger + ?Sized> Annotator<'a, T> {
    pub fn new(tagger: &'a T, config: &'a AnnotateConfig) -> Self {
        Self {
            tagger,
            config,
            special: SpecialCases::from_config(config),
        }
    }

    /// Annotate every word of the transcript in place.
    ///
    /// Existing annotations are cleared first. Segments are tagged one
    /// sentence at a time; tense labels are added once every segment is done.
    /// On error the transcript is left partially annotated and must not be
    /// saved.
    pub fn annotate_transcript(
        &self,
        transcript: &mut Transcript,
        progress: &mut Progress,
    ) -> Result<AnnotationSummary> {
        transcript.clear_annotations();

        let mut summary = AnnotationSummary::default();
        for segment in &mut transcript.segments {
            summary.alignment += self.annotate_segment(&mut segment.words, progress)?;
            summary.words += segment.words.len();
        }

        let (past_tenses, futures) = self.label_tenses(transcript);
        summary.past_tenses = past_tenses;
        summary.futures = futures;
        Ok(summary)
    }

    /// Tag and align one segment. Context windows never cross the segment.
    pub fn annotate_segment(
        &self,
        words: &mut [Word],
        progress: &mut Progress,
    ) -> Result<AlignmentStats> {
        let sentences = split_sentences(words, |w: &Word| w.text.as_str());
        let mut stats = AlignmentStats::default();

        for (index, sentence) in sentences.iter().enumerate() {
            let window = context_window(&sentences, index);
            let text = window_text(&words[window], |w: &Word| w.text.as_str());
            let unit = if text.trim().is_empty() {
                TaggedUnit::default()
            } else {
                self.tagger.tag(&text)?
            };

            stats += align_sentence(
                &mut words[sentence.clone()],
                &unit,
                self.tagger,
                &self.special,
            )?;
            progress.advance(sentence.len());
        }

        Ok(stats)
    }

    /// Add `Past_Tense_Type` and `Future_Type` labels to the tagged transcript.
    ///
    /// Returns the number of past-tense and future labels written.
    pub fn label_tenses(&self, transcript: &mut Transcript) -> (usize, usize) {
        let classifier = PastTenseClassifier::new(&self.config.auxiliaries);
        let past_tenses = transcript
            .segments
            .iter_mut()
            .map(|segment| classifier.classify_segment(&mut segment.words))
            .sum();
        let futures = transcript
            .segments
            .iter_mut()
            .map(|segment| detect_analytic_futures(&mut segment.words))
            .sum();
        (past_tenses, futures)
    }

    /// Annotate a transcript file and write it back in place.
    ///
    /// Files that are already annotated are skipped unless `overwrite` is set.
    /// Nothing is written if tagging fails part way through.
    pub fn annotate_file(
        &self,
        path: &Path,
        overwrite: bool,
        progress: &mut Progress,
    ) -> Result<FileOutcome> {
        let mut transcript = Transcript::load(path)?;
        if transcript.is_annotated() && !overwrite {
            log::info!("{} is already annotated, skipping", path.display());
            return Ok(FileOutcome::Skipped);
        }

        log::info!(
            "Annotating {} ({} words)",
            path.display(),
            transcript.word_count()
        );
        let summary = self.annotate_transcript(&mut transcript, progress)?;
        transcript.save(path)?;

        log::info!(
            "Finished {}: {} words, {} tagged alone, {} past tenses, {} futures",
            path.display(),
            summary.words,
            summary.alignment.fallback,
            summary.past_tenses,
            summary.futures
        );
        for (mode, words) in words_by_mode(&transcript) {
            log::debug!("  {mode}: {words} words");
        }
        progress.file_finished();

        Ok(FileOutcome::Annotated(summary))
    }
}

/// Word count of a file that still needs annotating, or `None` if it would be skipped.
pub fn pending_words(path: &Path, overwrite: bool) -> Result<Option<usize>> {
    let transcript = Transcript::load(path)?;
    if transcript.is_annotated() && !overwrite {
        Ok(None)
    } else {
        Ok(Some(transcript.word_count()))
    }
}

/// Words per discourse mode, in order of first appearance.
pub fn words_by_mode(transcript: &Transcript) -> IndexMap<DiscourseMode, usize> {
    let mut counts = IndexMap::new();
    for segment in &transcript.segments {
        let mode = transcript.speaker_attributes(segment).mode;
        *counts.entry(mode).or_insert(0) += segment.words.len();
    }
    counts
}
