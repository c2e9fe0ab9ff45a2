//! Segmentation capabilities
//!
//! The evaluator treats a segmenter as an opaque function from text to
//! ordered, non-overlapping token spans. The implementations here are
//! deterministic reference tokenizers used by the CLI and in tests.

mod pattern;
mod simple;
mod whitespace;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoxError, EvalError, EvalResult};
use crate::span::Span;

pub use pattern::{DEFAULT_TOKEN_PATTERN, RegexSegmenter};
pub use simple::SimpleSegmenter;
pub use whitespace::WhitespaceSegmenter;

/// Maps a text to its token boundaries
///
/// Output is expected sorted by start and non-overlapping; the evaluator
/// does not re-validate it. Failures are forwarded to the caller unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait Segmenter {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError>;
}

impl<T: Segmenter + ?Sized> Segmenter for &T {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError> {
        (**self).segment(text)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for Box<T> {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError> {
        (**self).segment(text)
    }
}

/// Built-in segmenter selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// Maximal runs of non-whitespace
    Whitespace,
    /// Character-class boundaries
    #[default]
    Simple,
    /// Matches of a regular expression
    Regex,
}

impl SegmenterKind {
    pub fn name(&self) -> &'static str {
        match self {
            SegmenterKind::Whitespace => "whitespace",
            SegmenterKind::Simple => "simple",
            SegmenterKind::Regex => "regex",
        }
    }

    pub fn all() -> &'static [SegmenterKind] {
        &[
            SegmenterKind::Whitespace,
            SegmenterKind::Simple,
            SegmenterKind::Regex,
        ]
    }

    /// Build the segmenter; `pattern` only applies to [`SegmenterKind::Regex`]
    pub fn build(&self, pattern: Option<&str>) -> EvalResult<Box<dyn Segmenter + Send + Sync>> {
        Ok(match self {
            SegmenterKind::Whitespace => Box::new(WhitespaceSegmenter),
            SegmenterKind::Simple => Box::new(SimpleSegmenter),
            SegmenterKind::Regex => Box::new(RegexSegmenter::new(
                pattern.unwrap_or(DEFAULT_TOKEN_PATTERN),
            )?),
        })
    }
}

impl fmt::Display for SegmenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SegmenterKind {
    type Err = EvalError;

    fn from_str(s: &str) -> EvalResult<Self> {
        SegmenterKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                EvalError::config(format!(
                    "unknown segmenter '{}', expected one of: whitespace, simple, regex",
                    s
                ))
            })
    }
}
