//! Partitioned evaluation across worker threads
//!
//! Each worker owns its own accumulator and scores a disjoint slice of the
//! corpus; the accumulators are merged afterwards. Because merging is
//! associative and commutative, the partitioning never changes the score.
//!
//! Monitors are built inside each worker from a factory, so they need not be
//! `Send`. Calls are ordered within a worker but interleave across workers.

use std::thread;

use super::monitor::EvaluationMonitor;
use super::segmentation::SegmentationEvaluator;
use crate::error::{EvalError, EvalResult};
use crate::metrics::{FMeasure, SampleOutcomes};
use crate::sample::TokenSample;
use crate::segmenters::Segmenter;

/// Merged result of a partitioned run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelOutcome {
    pub fmeasure: FMeasure,
    pub outcomes: SampleOutcomes,
}

impl ParallelOutcome {
    fn merge(&mut self, other: &ParallelOutcome) {
        self.fmeasure.merge(&other.fmeasure);
        self.outcomes.merge(&other.outcomes);
    }
}

/// Scores a sample stream on several threads
#[derive(Debug, Clone, Copy)]
pub struct ParallelEvaluator {
    workers: usize,
    chunk_size: usize,
}

impl ParallelEvaluator {
    /// Both arguments are clamped to at least one
    pub fn new(workers: usize, chunk_size: usize) -> Self {
        Self {
            workers: workers.max(1),
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Score every sample, reading at most `workers * chunk_size` at a time
    ///
    /// The first error from the source or any worker aborts the run.
    pub fn run<T, I>(&self, segmenter: &T, samples: I) -> EvalResult<ParallelOutcome>
    where
        T: Segmenter + Sync,
        I: IntoIterator<Item = EvalResult<TokenSample>>,
    {
        self.run_with_monitors(segmenter, samples, Vec::new)
    }

    /// Like [`ParallelEvaluator::run`], with monitors attached to every worker
    ///
    /// `make_monitors` is called once per worker partition; the monitors it
    /// returns see only that partition's samples.
    pub fn run_with_monitors<T, I, F>(
        &self,
        segmenter: &T,
        samples: I,
        make_monitors: F,
    ) -> EvalResult<ParallelOutcome>
    where
        T: Segmenter + Sync,
        I: IntoIterator<Item = EvalResult<TokenSample>>,
        F: Fn() -> Vec<Box<dyn EvaluationMonitor<TokenSample>>> + Sync,
    {
        let mut samples = samples.into_iter();
        let batch_size = self.workers * self.chunk_size;
        let mut total = ParallelOutcome::default();
        let mut batches = 0usize;

        loop {
            let batch = samples
                .by_ref()
                .take(batch_size)
                .collect::<EvalResult<Vec<_>>>()?;
            if batch.is_empty() {
                break;
            }
            batches += 1;

            let partial = self.score_batch(segmenter, &batch, &make_monitors)?;
            total.merge(&partial);

            if batch.len() < batch_size {
                break;
            }
        }

        tracing::debug!(
            workers = self.workers,
            batches,
            samples = total.outcomes.total(),
            "Parallel evaluation finished"
        );
        Ok(total)
    }

    fn score_batch<T, F>(
        &self,
        segmenter: &T,
        batch: &[TokenSample],
        make_monitors: &F,
    ) -> EvalResult<ParallelOutcome>
    where
        T: Segmenter + Sync,
        F: Fn() -> Vec<Box<dyn EvaluationMonitor<TokenSample>>> + Sync,
    {
        let partition_size = batch.len().div_ceil(self.workers);

        thread::scope(|scope| {
            let handles: Vec<_> = batch
                .chunks(partition_size)
                .map(|partition| {
                    scope.spawn(move || score_partition(segmenter, partition, make_monitors))
                })
                .collect();

            let mut merged = ParallelOutcome::default();
            let mut first_error: Option<EvalError> = None;
            for handle in handles {
                match handle.join() {
                    Ok(Ok(outcome)) => merged.merge(&outcome),
                    Ok(Err(e)) => {
                        first_error.get_or_insert(e);
                    }
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }

            match first_error {
                Some(e) => Err(e),
                None => Ok(merged),
            }
        })
    }
}

fn score_partition<T, F>(segmenter: &T, partition: &[TokenSample], make_monitors: &F) -> EvalResult<ParallelOutcome>
where
    T: Segmenter,
    F: Fn() -> Vec<Box<dyn EvaluationMonitor<TokenSample>>>,
{
    let mut evaluator = SegmentationEvaluator::new(segmenter);
    for monitor in make_monitors() {
        evaluator.add_boxed_monitor(monitor);
    }
    evaluator.evaluate(partition)?;
    Ok(ParallelOutcome {
        fmeasure: *evaluator.fmeasure(),
        outcomes: *evaluator.outcomes(),
    })
}
