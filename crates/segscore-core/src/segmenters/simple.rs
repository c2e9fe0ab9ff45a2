//! Character-class tokenizer

use crate::error::BoxError;
use crate::span::Span;

use super::Segmenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Alphabetic,
    Numeric,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_alphabetic() {
            CharClass::Alphabetic
        } else if c.is_numeric() {
            CharClass::Numeric
        } else {
            CharClass::Other
        }
    }
}

/// Splits wherever the character class changes
///
/// Whitespace is dropped. Runs of the same punctuation character (`...`,
/// `--`) stay one token; different punctuation characters split.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSegmenter;

impl Segmenter for SimpleSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Span>, BoxError> {
        let mut spans = Vec::new();
        let mut start: Option<usize> = None;
        let mut previous: Option<(CharClass, char)> = None;

        for (index, c) in text.char_indices() {
            let class = CharClass::of(c);

            if class == CharClass::Whitespace {
                if let Some(s) = start.take() {
                    spans.push(Span::from_range(s, index));
                }
            } else if let (Some(s), Some((prev_class, prev_char))) = (start, previous) {
                let boundary =
                    class != prev_class || (class == CharClass::Other && c != prev_char);
                if boundary {
                    spans.push(Span::from_range(s, index));
                    start = Some(index);
                }
            } else {
                start = Some(index);
            }

            previous = Some((class, c));
        }

        if let Some(s) = start {
            spans.push(Span::from_range(s, text.len()));
        }

        Ok(spans)
    }
}
