//! Evaluation monitors
//!
//! Monitors observe every `(reference, predicted)` pair the harness produces.
//! They are called synchronously, in registration order, and an error from
//! any of them aborts the evaluation pass.

use std::collections::HashSet;
use std::marker::PhantomData;

use crate::error::BoxError;
use crate::sample::TokenSample;
use crate::span::Span;

/// Observer of per-sample evaluation outcomes
pub trait EvaluationMonitor<S> {
    /// The prediction reproduced the reference exactly
    fn correctly_classified(&mut self, _reference: &S, _predicted: &S) -> Result<(), BoxError> {
        Ok(())
    }

    /// The prediction differs from the reference
    fn misclassified(&mut self, _reference: &S, _predicted: &S) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<S, M> EvaluationMonitor<S> for &mut M
where
    M: EvaluationMonitor<S> + ?Sized,
{
    fn correctly_classified(&mut self, reference: &S, predicted: &S) -> Result<(), BoxError> {
        (**self).correctly_classified(reference, predicted)
    }

    fn misclassified(&mut self, reference: &S, predicted: &S) -> Result<(), BoxError> {
        (**self).misclassified(reference, predicted)
    }
}

/// Monitor assembled from two closures
pub struct CallbackMonitor<S, C, I> {
    on_correct: C,
    on_misclassified: I,
    _sample: PhantomData<fn(&S)>,
}

impl<S, C, I> CallbackMonitor<S, C, I>
where
    C: FnMut(&S, &S) -> Result<(), BoxError>,
    I: FnMut(&S, &S) -> Result<(), BoxError>,
{
    pub fn new(on_correct: C, on_misclassified: I) -> Self {
        Self {
            on_correct,
            on_misclassified,
            _sample: PhantomData,
        }
    }
}

impl<S, C, I> EvaluationMonitor<S> for CallbackMonitor<S, C, I>
where
    C: FnMut(&S, &S) -> Result<(), BoxError>,
    I: FnMut(&S, &S) -> Result<(), BoxError>,
{
    fn correctly_classified(&mut self, reference: &S, predicted: &S) -> Result<(), BoxError> {
        (self.on_correct)(reference, predicted)
    }

    fn misclassified(&mut self, reference: &S, predicted: &S) -> Result<(), BoxError> {
        (self.on_misclassified)(reference, predicted)
    }
}

/// Logs the missed and spurious tokens of every misclassified sample
#[derive(Debug, Default)]
pub struct MisclassificationLogger {
    /// Stop logging after this many samples (None = unlimited)
    max_logged: Option<u64>,
    logged: u64,
}

impl MisclassificationLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_logged: u64) -> Self {
        Self {
            max_logged: Some(max_logged),
            logged: 0,
        }
    }

    pub fn logged(&self) -> u64 {
        self.logged
    }
}

/// Spans in `left` that have no equal in `right`, rendered with their text
fn unmatched(text: &str, left: &[Span], right: &[Span]) -> Vec<String> {
    let right: HashSet<&Span> = right.iter().collect();
    left.iter()
        .filter(|span| !right.contains(span))
        .map(|span| format!("{}'{}'", span, span.covered_text(text).unwrap_or_default()))
        .collect()
}

impl EvaluationMonitor<TokenSample> for MisclassificationLogger {
    fn misclassified(
        &mut self,
        reference: &TokenSample,
        predicted: &TokenSample,
    ) -> Result<(), BoxError> {
        if self.max_logged.is_some_and(|max| self.logged >= max) {
            return Ok(());
        }
        self.logged += 1;

        let missed = unmatched(reference.text(), reference.spans(), predicted.spans());
        let spurious = unmatched(predicted.text(), predicted.spans(), reference.spans());

        tracing::warn!(
            text = %reference.text(),
            expected = %reference,
            predicted = %predicted,
            missed = ?missed,
            spurious = ?spurious,
            "Misclassified sample"
        );
        Ok(())
    }
}
