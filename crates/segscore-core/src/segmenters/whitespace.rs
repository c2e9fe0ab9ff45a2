//! Whitespace tokenizer

use crate::error::BoxError;
use crate::span::Span;

use super::Segmenter;

/// Every maximal run of non-whitespace characters is a token
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError> {
        let mut spans = Vec::new();
        let mut start = None;

        for (index, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(s)) => {
                    spans.push(Span::from_range(s, index));
                    start = None;
                }
                (false, None) => start = Some(index),
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push(Span::from_range(s, text.len()));
        }

        Ok(spans)
    }
}
