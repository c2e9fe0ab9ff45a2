//! Corpus loading
//!
//! Reference samples are read lazily, one line at a time, so corpora of any
//! size can be evaluated without holding them in memory.

mod loader;
mod stream;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

pub use loader::{CorpusLoader, CorpusStream};
pub use stream::SampleStream;

/// On-disk layout of reference samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusFormat {
    /// One sample per line, whitespace plus split tags mark boundaries
    #[default]
    Annotated,
    /// One JSON object per line: `{"text": .., "spans": [{"start", "end", "label"?}]}`
    #[serde(rename = "jsonl", alias = "json_lines")]
    JsonLines,
}

impl CorpusFormat {
    pub fn name(&self) -> &'static str {
        match self {
            CorpusFormat::Annotated => "annotated",
            CorpusFormat::JsonLines => "jsonl",
        }
    }

    /// Guess the format from a file extension, defaulting to annotated text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => CorpusFormat::JsonLines,
            _ => CorpusFormat::Annotated,
        }
    }
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorpusFormat {
    type Err = EvalError;

    fn from_str(s: &str) -> EvalResult<Self> {
        match s.to_lowercase().as_str() {
            "annotated" | "txt" | "split" => Ok(CorpusFormat::Annotated),
            "jsonl" | "json_lines" | "json" => Ok(CorpusFormat::JsonLines),
            other => Err(EvalError::config(format!(
                "unknown corpus format '{}', expected annotated or jsonl",
                other
            ))),
        }
    }
}
