//! Evaluation runner components
//!
//! The generic streaming harness, its monitors, the segmentation evaluator
//! built on top of it, and the partitioned parallel driver.

mod config;
mod evaluator;
mod monitor;
mod parallel;
mod segmentation;

pub use config::EvalConfig;
pub use evaluator::{Evaluator, ProcessSample};
pub use monitor::{CallbackMonitor, EvaluationMonitor, MisclassificationLogger};
pub use parallel::{ParallelEvaluator, ParallelOutcome};
pub use segmentation::{SegmentationEvaluator, SegmentationScorer};
