//! Boundary spans
//!
//! A [`Span`] is a half-open `[start, end)` byte range over a text,
//! optionally tagged with a category label. Spans compare by value only:
//! two spans are equal iff start, end and label all match.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// Half-open boundary `[start, end)` over a text
///
/// Ordering is by `start`, then `end`, then label (unlabeled first), which
/// keeps `Ord` consistent with `Eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Span {
    /// Create an unlabeled span
    ///
    /// Zero-length spans are legal; `end < start` is not.
    pub fn new(start: usize, end: usize) -> EvalResult<Self> {
        if end < start {
            return Err(EvalError::InvalidSpan { start, end });
        }
        Ok(Self {
            start,
            end,
            label: None,
        })
    }

    /// Span for a range the caller has already ordered
    pub(crate) fn from_range(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            label: None,
        }
    }

    /// Create a labeled span
    pub fn labeled(start: usize, end: usize, label: impl Into<String>) -> EvalResult<Self> {
        Ok(Self::new(start, end)?.with_label(label))
    }

    /// Attach a label, replacing any existing one
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two spans share at least one position
    ///
    /// A zero-length span intersects a span that strictly contains its position.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
            || self.is_empty() && other.start < self.start && self.start < other.end
            || other.is_empty() && self.start < other.start && other.start < self.end
    }

    /// Text covered by this span, if it lies within `text` on char boundaries
    pub fn covered_text<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)?;
        if let Some(label) = &self.label {
            write!(f, " {}", label)?;
        }
        Ok(())
    }
}

/// Wire form used for deserialization so `end < start` is rejected on load
#[derive(Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
    #[serde(default)]
    label: Option<String>,
}

impl<'de> Deserialize<'de> for Span {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSpan::deserialize(deserializer)?;
        let span = Span::new(raw.start, raw.end).map_err(serde::de::Error::custom)?;
        Ok(match raw.label {
            Some(label) => span.with_label(label),
            None => span,
        })
    }
}
