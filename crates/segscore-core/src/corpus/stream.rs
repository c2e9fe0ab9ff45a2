//! Line-oriented sample stream

use std::io::{BufRead, Lines};

use super::CorpusFormat;
use crate::error::{EvalError, EvalResult};
use crate::sample::TokenSample;

/// Lazy iterator of reference samples read from a line source
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub struct SampleStream<R> {
    lines: Lines<R>,
    line_number: usize,
    format: CorpusFormat,
    split_tag: String,
}

impl<R: BufRead> SampleStream<R> {
    pub fn new(reader: R, format: CorpusFormat, split_tag: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            format,
            split_tag: split_tag.into(),
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_line(&self, line: &str) -> EvalResult<TokenSample> {
        match self.format {
            CorpusFormat::Annotated => TokenSample::parse(line, &self.split_tag),
            CorpusFormat::JsonLines => Ok(serde_json::from_str(line)?),
        }
    }
}

impl<R: BufRead> Iterator for SampleStream<R> {
    type Item = EvalResult<TokenSample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(EvalError::Io {
                        message: format!("line {}: {}", self.line_number, e),
                        path: None,
                    }));
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(
                self.parse_line(&line)
                    .map_err(|e| e.at_line(self.line_number)),
            );
        }
    }
}
