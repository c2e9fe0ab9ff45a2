//! Regular-expression tokenizer

use regex::Regex;

use crate::error::{BoxError, EvalError, EvalResult};
use crate::span::Span;

use super::Segmenter;

/// Words, or runs of punctuation
pub const DEFAULT_TOKEN_PATTERN: &str = r"\w+|[^\w\s]+";

/// Every non-empty match of a pattern is a token
#[derive(Debug, Clone)]
pub struct RegexSegmenter {
    pattern: Regex,
}

impl RegexSegmenter {
    pub fn new(pattern: &str) -> EvalResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| EvalError::config(format!("invalid token pattern '{}': {}", pattern, e)))?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Segmenter for RegexSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError> {
        Ok(self
            .pattern
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| Span::from_range(m.start(), m.end()))
            .collect())
    }
}
