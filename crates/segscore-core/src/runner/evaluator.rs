//! Streaming evaluation harness
//!
//! The harness pulls one reference sample at a time, hands it to a
//! [`ProcessSample`] implementation, and tells every registered monitor
//! whether the prediction reproduced the reference exactly. It keeps no
//! corpus state of its own; metrics live in whatever the processor owns.

use std::borrow::Borrow;

use super::monitor::EvaluationMonitor;
use crate::error::{EvalError, EvalResult};
use crate::metrics::SampleOutcomes;

/// Per-sample scoring step: turn a reference into a prediction
///
/// Implemented for any `FnMut(&S) -> EvalResult<S>` closure, so ad-hoc
/// scorers need no wrapper type.
pub trait ProcessSample<S> {
    fn process_sample(&mut self, reference: &S) -> EvalResult<S>;
}

impl<S, F> ProcessSample<S> for F
where
    F: FnMut(&S) -> EvalResult<S>,
{
    fn process_sample(&mut self, reference: &S) -> EvalResult<S> {
        self(reference)
    }
}

/// Generic evaluation harness over samples of type `S`
pub struct Evaluator<'a, S, P> {
    /// Scoring step, owns any accumulated metrics
    processor: P,

    /// Notified in registration order after every sample
    monitors: Vec<Box<dyn EvaluationMonitor<S> + 'a>>,

    /// Exact-match counts over every sample seen so far
    outcomes: SampleOutcomes,
}

impl<'a, S, P> Evaluator<'a, S, P>
where
    S: PartialEq,
    P: ProcessSample<S>,
{
    /// Create a harness with no monitors
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            monitors: Vec::new(),
            outcomes: SampleOutcomes::default(),
        }
    }

    /// Register a monitor
    pub fn with_monitor(mut self, monitor: impl EvaluationMonitor<S> + 'a) -> Self {
        self.add_monitor(monitor);
        self
    }

    /// Register a monitor on an existing harness
    pub fn add_monitor(&mut self, monitor: impl EvaluationMonitor<S> + 'a) {
        self.monitors.push(Box::new(monitor));
    }

    /// Register an already boxed monitor
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn EvaluationMonitor<S> + 'a>) {
        self.monitors.push(monitor);
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    /// Score one reference sample and notify the monitors
    ///
    /// Returns the predicted sample. A failing processor or monitor aborts
    /// immediately; whatever the processor accumulated before is kept.
    pub fn evaluate_sample(&mut self, reference: &S) -> EvalResult<S> {
        let predicted = self.processor.process_sample(reference)?;
        let correct = *reference == predicted;
        self.outcomes.record(correct);

        tracing::debug!(
            sample = self.outcomes.total(),
            correct,
            "Evaluated sample"
        );

        for monitor in &mut self.monitors {
            let notified = if correct {
                monitor.correctly_classified(reference, &predicted)
            } else {
                monitor.misclassified(reference, &predicted)
            };
            notified.map_err(EvalError::Observer)?;
        }

        Ok(predicted)
    }

    /// Consume a sequence of samples, one at a time, in order
    ///
    /// Returns the number of samples evaluated by this call.
    pub fn evaluate<I>(&mut self, samples: I) -> EvalResult<u64>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut count = 0;
        for sample in samples {
            self.evaluate_sample(sample.borrow())?;
            count += 1;
        }
        self.log_pass(count);
        Ok(count)
    }

    /// Consume a fallible sample source such as a corpus stream
    ///
    /// A source error aborts the pass like any scoring failure.
    pub fn try_evaluate<I>(&mut self, samples: I) -> EvalResult<u64>
    where
        I: IntoIterator<Item = EvalResult<S>>,
    {
        let mut count = 0;
        for sample in samples {
            self.evaluate_sample(&sample?)?;
            count += 1;
        }
        self.log_pass(count);
        Ok(count)
    }

    fn log_pass(&self, count: u64) {
        tracing::info!(
            samples = count,
            correct = self.outcomes.correct,
            misclassified = self.outcomes.misclassified,
            "Evaluation pass finished"
        );
    }

    pub fn outcomes(&self) -> &SampleOutcomes {
        &self.outcomes
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }

    /// Drop the monitors and hand back the processor with its state
    pub fn into_processor(self) -> P {
        self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::runner::monitor::CallbackMonitor;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(bool, i32)>,
    }

    impl EvaluationMonitor<i32> for Recorder {
        fn correctly_classified(&mut self, reference: &i32, _predicted: &i32) -> Result<(), BoxError> {
            self.events.push((true, *reference));
            Ok(())
        }

        fn misclassified(&mut self, reference: &i32, _predicted: &i32) -> Result<(), BoxError> {
            self.events.push((false, *reference));
            Ok(())
        }
    }

    #[test]
    fn test_closure_processor_and_monitor_dispatch() {
        let mut recorder = Recorder::default();
        {
            // even numbers are reproduced, odd ones are not
            let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> {
                Ok(if r % 2 == 0 { *r } else { r + 1 })
            })
            .with_monitor(&mut recorder);
            let count = evaluator.evaluate(vec![2, 3, 4]).unwrap();

            assert_eq!(count, 3);
            assert_eq!(evaluator.outcomes().correct, 2);
            assert_eq!(evaluator.outcomes().misclassified, 1);
        }
        assert_eq!(recorder.events, vec![(true, 2), (false, 3), (true, 4)]);
    }

    #[test]
    fn test_evaluate_sample_returns_prediction() {
        let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> { Ok(r * 10) });
        assert_eq!(evaluator.evaluate_sample(&4).unwrap(), 40);
    }

    #[test]
    fn test_evaluate_accepts_borrowed_items() {
        let samples = [1, 2, 3];
        let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> { Ok(*r) });
        assert_eq!(evaluator.evaluate(samples.iter()).unwrap(), 3);
        assert_eq!(evaluator.outcomes().accuracy(), 1.0);
    }

    #[test]
    fn test_processor_failure_halts_pass() {
        let mut seen = Vec::new();
        let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> {
            seen.push(*r);
            if *r == 2 {
                Err(EvalError::scoring("boom"))
            } else {
                Ok(*r)
            }
        });

        let err = evaluator.evaluate(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, EvalError::Scoring(_)));
        assert_eq!(evaluator.outcomes().total(), 1);
        drop(evaluator);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_monitor_failure_aborts_and_later_monitors_not_called() {
        let mut order = Vec::new();
        {
            let failing = CallbackMonitor::new(
                |_: &i32, _: &i32| Err::<(), BoxError>("monitor broke".into()),
                |_: &i32, _: &i32| Ok(()),
            );
            let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> { Ok(*r) })
                .with_monitor(failing)
                .with_monitor(CallbackMonitor::new(
                    |r: &i32, _: &i32| {
                        order.push(*r);
                        Ok(())
                    },
                    |_: &i32, _: &i32| Ok(()),
                ));

            let err = evaluator.evaluate(vec![7, 8]).unwrap_err();
            assert!(matches!(err, EvalError::Observer(_)));
            assert_eq!(evaluator.outcomes().total(), 1);
        }
        assert!(order.is_empty());
    }

    #[test]
    fn test_source_error_aborts_try_evaluate() {
        let source: Vec<EvalResult<i32>> = vec![Ok(1), Err(EvalError::parse(2, "bad line")), Ok(3)];
        let mut evaluator = Evaluator::new(|r: &i32| -> EvalResult<i32> { Ok(*r) });

        let err = evaluator.try_evaluate(source).unwrap_err();
        assert!(matches!(err, EvalError::Parse { line: 2, .. }));
        assert_eq!(evaluator.outcomes().total(), 1);
    }

    #[test]
    fn test_unbounded_source_can_be_cut_by_caller() {
        let mut evaluator = Evaluator::new(|r: &u64| -> EvalResult<u64> { Ok(*r) });
        let count = evaluator.evaluate((0u64..).take(1000)).unwrap();
        assert_eq!(count, 1000);
    }
}
