use indicatif::{ProgressBar, ProgressStyle};

/// Counts annotated words across a whole run.
///
/// Logs a message every `step` words and when the last word is reached, and a
/// percentage after each file.
pub struct Progress {
    bar: ProgressBar,
    annotated: usize,
    total: usize,
    step: usize,
    last_step: usize,
}

impl Progress {
    pub fn new(total: usize, step: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({per_sec}, {eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self::with_bar(bar, total, step)
    }

    /// A progress counter that draws nothing.
    pub fn hidden(total: usize, step: usize) -> Self {
        Self::with_bar(ProgressBar::hidden(), total, step)
    }

    fn with_bar(bar: ProgressBar, total: usize, step: usize) -> Self {
        Self {
            bar,
            annotated: 0,
            total,
            step: step.max(1),
            last_step: 0,
        }
    }

    /// Record `words` more annotated words. Returns true if a step message was logged.
    pub fn advance(&mut self, words: usize) -> bool {
        if words == 0 {
            return false;
        }
        self.annotated += words;
        self.bar.inc(words as u64);

        let current_step = self.annotated / self.step;
        if current_step > self.last_step || self.annotated == self.total {
            self.last_step = current_step;
            log::info!("{} / {} words annotated", self.annotated, self.total);
            true
        } else {
            false
        }
    }

    pub fn file_finished(&self) {
        log::info!(
            "{} of {} words annotated ({:.1}%)",
            self.annotated,
            self.total,
            self.percentage()
        );
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * self.annotated as f64 / self.total as f64
        }
    }

    pub fn annotated(&self) -> usize {
        self.annotated
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_messages() {
        let mut progress = Progress::hidden(6000, 2500);
        assert!(!progress.advance(2000));
        assert!(progress.advance(1000));
        assert!(!progress.advance(1000));
        assert!(progress.advance(1500));
        // the last word always reports
        assert!(progress.advance(500));
        assert_eq!(progress.annotated(), 6000);
        assert_eq!(progress.percentage(), 100.0);
    }

    #[test]
    fn test_empty_run() {
        let mut progress = Progress::hidden(0, 2500);
        assert!(!progress.advance(0));
        assert_eq!(progress.percentage(), 100.0);
    }
}
