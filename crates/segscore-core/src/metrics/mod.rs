//! Metrics accumulated during evaluation
//!
//! [`FMeasure`] holds span-level counts, [`SampleOutcomes`] holds
//! sample-level exact-match counts. Both merge associatively, so partitions
//! of a corpus can be scored independently and reduced afterwards.

mod fmeasure;
mod outcomes;

pub use fmeasure::{FMeasure, count_true_positives};
pub use outcomes::SampleOutcomes;
