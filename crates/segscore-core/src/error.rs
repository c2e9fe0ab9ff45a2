//! Error types for segscore
//!
//! Every failure is fatal to the evaluation pass in progress. Accumulated
//! metrics from samples processed before the failure stay valid.

use thiserror::Error;

use crate::span::Span;

/// Boxed error produced by an external capability (segmenter, monitor, sample source)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for segscore operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Main error type for segscore
#[derive(Error, Debug)]
pub enum EvalError {
    /// A span was constructed with `end < start`
    #[error("Invalid span: end {end} is before start {start}")]
    InvalidSpan { start: usize, end: usize },

    /// A reference span does not fit inside its sample text
    #[error("Span {span} is out of bounds for text of length {text_len}")]
    SpanOutOfBounds { span: Span, text_len: usize },

    /// The segmentation capability failed while scoring a sample
    #[error("Scoring failed: {0}")]
    Scoring(#[source] BoxError),

    /// An evaluation monitor failed while being notified
    #[error("Observer failed: {0}")]
    Observer(#[source] BoxError),

    /// Malformed corpus line
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EvalError {
    /// Wrap a segmenter failure
    pub fn scoring(error: impl Into<BoxError>) -> Self {
        Self::Scoring(error.into())
    }

    /// Wrap a monitor failure
    pub fn observer(error: impl Into<BoxError>) -> Self {
        Self::Observer(error.into())
    }

    /// Create a new parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an IO error that remembers the offending path
    pub fn io_with_path(error: std::io::Error, path: impl Into<String>) -> Self {
        Self::Io {
            message: error.to_string(),
            path: Some(path.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Set the line number on a parse error; other variants pass through
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse { line, message },
            Self::Json(message) => Self::Parse { line, message },
            other => other,
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
