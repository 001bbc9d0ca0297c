use std::path::{Path, PathBuf};

use annotate_corpus::annotate::pending_words;
use annotate_corpus::progress::Progress;
use annotate_corpus::{AnnotateConfig, Annotator, CachedTagger, FileOutcome, HttpTagger, Tagger};
use anyhow::{Context, bail};
use clap::Parser;

/// Annotate transcript JSON files with part of speech and tense labels
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the transcript files
    dir: PathBuf,

    /// Only annotate the first N files (by name)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Re-annotate files that already carry annotations
    #[arg(long)]
    overwrite: bool,

    /// Tagging service endpoint
    #[arg(long, default_value = "http://localhost:8000/tag")]
    tagger_url: String,

    /// JSONL cache of tagger results
    #[arg(long)]
    tagger_cache: Option<PathBuf>,

    /// JSON file overriding the default lexicons
    #[arg(long)]
    config: Option<PathBuf>,
}

fn transcript_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnnotateConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnnotateConfig::default(),
    };

    if !args.dir.is_dir() {
        bail!("Directory {} not found", args.dir.display());
    }
    let mut files = transcript_files(&args.dir)?;
    if files.is_empty() {
        bail!("No JSON files found in {}", args.dir.display());
    }
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }

    let mut to_annotate = Vec::new();
    let mut total_words = 0;
    for path in files {
        match pending_words(&path, args.overwrite)
            .with_context(|| format!("Failed to read {}", path.display()))?
        {
            Some(words) => {
                total_words += words;
                to_annotate.push(path);
            }
            None => log::info!("{} is already annotated, skipping", path.display()),
        }
    }
    if to_annotate.is_empty() {
        println!("No files to annotate.");
        return Ok(());
    }
    println!(
        "Annotating {} files with {} words in total",
        to_annotate.len(),
        total_words
    );

    let http = HttpTagger::new(args.tagger_url.clone()).context("Failed to create tagger client")?;
    let tagger: Box<dyn Tagger> = match &args.tagger_cache {
        Some(cache_file) => Box::new(
            CachedTagger::open(http, cache_file)
                .with_context(|| format!("Failed to open tagger cache {}", cache_file.display()))?,
        ),
        None => Box::new(http),
    };

    let annotator = Annotator::new(tagger.as_ref(), &config);
    let mut progress = Progress::new(total_words, config.progress_step);
    let mut annotated_files = 0;

    for path in &to_annotate {
        let outcome = annotator
            .annotate_file(path, args.overwrite, &mut progress)
            .with_context(|| format!("Failed to annotate {}", path.display()))?;
        if let FileOutcome::Annotated(_) = outcome {
            annotated_files += 1;
        }
    }
    progress.finish();

    println!(
        "Annotated {} files, {} words in total.",
        annotated_files,
        progress.annotated()
    );

    Ok(())
}
