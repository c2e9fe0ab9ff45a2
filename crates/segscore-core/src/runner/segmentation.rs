//! Segmentation evaluation
//!
//! Wires a [`Segmenter`] and an [`FMeasure`] into the generic harness: each
//! reference text is segmented, the predicted spans are scored against the
//! gold spans, and the prediction is handed on to the monitors.

use std::borrow::Borrow;

use super::evaluator::{Evaluator, ProcessSample};
use super::monitor::EvaluationMonitor;
use crate::error::{EvalError, EvalResult};
use crate::metrics::{FMeasure, SampleOutcomes};
use crate::sample::TokenSample;
use crate::segmenters::Segmenter;

/// Scoring step that runs a segmenter and accumulates span counts
pub struct SegmentationScorer<T> {
    segmenter: T,
    fmeasure: FMeasure,
}

impl<T: Segmenter> SegmentationScorer<T> {
    pub fn new(segmenter: T) -> Self {
        Self {
            segmenter,
            fmeasure: FMeasure::new(),
        }
    }

    pub fn segmenter(&self) -> &T {
        &self.segmenter
    }

    pub fn fmeasure(&self) -> &FMeasure {
        &self.fmeasure
    }
}

impl<T: Segmenter> ProcessSample<TokenSample> for SegmentationScorer<T> {
    fn process_sample(&mut self, reference: &TokenSample) -> EvalResult<TokenSample> {
        let predicted = self
            .segmenter
            .segment(reference.text())
            .map_err(EvalError::Scoring)?;

        self.fmeasure.update_scores(reference.spans(), &predicted);

        Ok(TokenSample::predicted(reference.text(), predicted))
    }
}

/// Measures a segmenter against gold-annotated token samples
pub struct SegmentationEvaluator<'a, T> {
    evaluator: Evaluator<'a, TokenSample, SegmentationScorer<T>>,
}

impl<'a, T: Segmenter> SegmentationEvaluator<'a, T> {
    pub fn new(segmenter: T) -> Self {
        Self {
            evaluator: Evaluator::new(SegmentationScorer::new(segmenter)),
        }
    }

    /// Register a monitor
    pub fn with_monitor(mut self, monitor: impl EvaluationMonitor<TokenSample> + 'a) -> Self {
        self.evaluator.add_monitor(monitor);
        self
    }

    /// Register a monitor on an existing evaluator
    pub fn add_monitor(&mut self, monitor: impl EvaluationMonitor<TokenSample> + 'a) {
        self.evaluator.add_monitor(monitor);
    }

    /// Register an already boxed monitor
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn EvaluationMonitor<TokenSample> + 'a>) {
        self.evaluator.add_boxed_monitor(monitor);
    }

    /// Score a single reference sample, returning the prediction
    pub fn evaluate_sample(&mut self, reference: &TokenSample) -> EvalResult<TokenSample> {
        self.evaluator.evaluate_sample(reference)
    }

    /// Score every sample of an in-memory or otherwise infallible source
    pub fn evaluate<I>(&mut self, samples: I) -> EvalResult<u64>
    where
        I: IntoIterator,
        I::Item: Borrow<TokenSample>,
    {
        let count = self.evaluator.evaluate(samples)?;
        self.log_scores();
        Ok(count)
    }

    /// Score every sample of a fallible source, e.g. a corpus stream
    pub fn try_evaluate<I>(&mut self, samples: I) -> EvalResult<u64>
    where
        I: IntoIterator<Item = EvalResult<TokenSample>>,
    {
        let count = self.evaluator.try_evaluate(samples)?;
        self.log_scores();
        Ok(count)
    }

    fn log_scores(&self) {
        let fm = self.fmeasure();
        tracing::info!(
            precision = fm.precision(),
            recall = fm.recall(),
            fmeasure = fm.fmeasure(),
            "Segmentation scores"
        );
    }

    /// Live accumulator; valid after a full pass or a failed one
    pub fn fmeasure(&self) -> &FMeasure {
        self.evaluator.processor().fmeasure()
    }

    pub fn outcomes(&self) -> &SampleOutcomes {
        self.evaluator.outcomes()
    }

    pub fn segmenter(&self) -> &T {
        self.evaluator.processor().segmenter()
    }

    pub fn into_fmeasure(self) -> FMeasure {
        self.evaluator.into_processor().fmeasure
    }
}
