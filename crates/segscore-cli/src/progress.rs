//! Progress display for evaluation runs

use indicatif::{ProgressBar, ProgressStyle};
use segscore_core::{BoxError, EvaluationMonitor, TokenSample};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.blue} {msg} [{elapsed_precise}] {pos} samples";

/// Spinner that ticks once per evaluated sample
///
/// Clones share the spinner and the misclassified count, so one clone can be
/// handed to each worker thread.
#[derive(Clone)]
pub struct ProgressMonitor {
    bar: ProgressBar,
    misclassified: Arc<AtomicU64>,
}

impl ProgressMonitor {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            misclassified: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Leave the spinner visible where it stopped
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl EvaluationMonitor<TokenSample> for ProgressMonitor {
    fn correctly_classified(&mut self, _: &TokenSample, _: &TokenSample) -> Result<(), BoxError> {
        self.bar.inc(1);
        Ok(())
    }

    fn misclassified(&mut self, _: &TokenSample, _: &TokenSample) -> Result<(), BoxError> {
        let misclassified = self.misclassified.fetch_add(1, Ordering::Relaxed) + 1;
        self.bar.inc(1);
        self.bar
            .set_message(format!("Scoring ({} misclassified)", misclassified));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_progress() {
        let progress = ProgressMonitor::new("Scoring");
        let mut first = progress.clone();
        let mut second = progress.clone();
        let sample = TokenSample::parse("a b", segscore_core::DEFAULT_SPLIT_TAG).unwrap();

        first.correctly_classified(&sample, &sample).unwrap();
        first.misclassified(&sample, &sample).unwrap();
        second.misclassified(&sample, &sample).unwrap();

        assert_eq!(progress.bar.position(), 3);
        assert_eq!(progress.misclassified.load(Ordering::Relaxed), 2);
        progress.finish();
    }
}
