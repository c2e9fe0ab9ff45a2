//! Span-level evaluation of tokenizers
//!
//! This crate scores a segmenter (any function from text to token spans)
//! against a gold-annotated corpus and reports micro-averaged precision,
//! recall and F-measure.
//!
//! # Features
//!
//! - **Span and sample types**: half-open byte spans and annotated samples
//! - **FMeasure**: mergeable span-count accumulator
//! - **Streaming harness**: generic [`Evaluator`] with pluggable monitors
//! - **Corpus loading**: lazy streams over annotated text or JSON Lines
//! - **Parallel scoring**: per-worker accumulators reduced with `merge`
//! - **Report generation**: JSON, Markdown, and terminal table output
//!
//! # Example
//!
//! ```rust,ignore
//! use segscore_core::{CorpusLoader, SegmentationEvaluator, SimpleSegmenter};
//!
//! let corpus = CorpusLoader::new().open("gold.txt")?;
//! let mut evaluator = SegmentationEvaluator::new(SimpleSegmenter);
//! evaluator.try_evaluate(corpus)?;
//! println!("{}", evaluator.fmeasure());
//! ```

pub mod corpus;
pub mod error;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod sample;
pub mod segmenters;
pub mod span;

// Re-exports for convenience
pub use corpus::{CorpusFormat, CorpusLoader, CorpusStream, SampleStream};
pub use error::{BoxError, EvalError, EvalResult};
pub use metrics::{FMeasure, SampleOutcomes};
pub use report::{EvalReport, ReportFormat, generate_report};
pub use runner::{
    CallbackMonitor, EvalConfig, EvaluationMonitor, Evaluator, MisclassificationLogger,
    ParallelEvaluator, ParallelOutcome, ProcessSample, SegmentationEvaluator,
};
pub use sample::{DEFAULT_SPLIT_TAG, TokenSample};
pub use segmenters::{
    RegexSegmenter, Segmenter, SegmenterKind, SimpleSegmenter, WhitespaceSegmenter,
};
pub use span::Span;
