//! Token samples: a text plus its token boundaries
//!
//! The same type carries both the gold reference read from a corpus and the
//! prediction built from a segmenter's output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};
use crate::span::Span;

/// Default marker for a token boundary that has no whitespace around it
pub const DEFAULT_SPLIT_TAG: &str = "<SPLIT>";

/// Text with its ordered token spans
///
/// Equality is structural: same text and same span sequence, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTokenSample")]
pub struct TokenSample {
    text: String,
    spans: Vec<Span>,
}

#[derive(Deserialize)]
struct RawTokenSample {
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
}

impl TryFrom<RawTokenSample> for TokenSample {
    type Error = EvalError;

    fn try_from(raw: RawTokenSample) -> EvalResult<Self> {
        TokenSample::new(raw.text, raw.spans)
    }
}

impl TokenSample {
    /// Create a sample, checking that every span lies within the text
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> EvalResult<Self> {
        let text = text.into();
        if let Some(span) = spans.iter().find(|s| s.covered_text(&text).is_none()) {
            return Err(EvalError::SpanOutOfBounds {
                span: span.clone(),
                text_len: text.len(),
            });
        }
        Ok(Self { text, spans })
    }

    /// Build a sample from segmenter output without re-validating it
    pub(crate) fn predicted(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            spans,
        }
    }

    /// Parse an annotated line
    ///
    /// Whitespace separates tokens; inside a whitespace-delimited chunk,
    /// `split_tag` marks an extra boundary. The resulting text joins the
    /// chunks with single spaces, e.g. `"Hello<SPLIT>, world<SPLIT>!"`
    /// becomes `"Hello, world!"` with four token spans.
    pub fn parse(line: &str, split_tag: &str) -> EvalResult<Self> {
        if split_tag.is_empty() {
            return Err(EvalError::config("split tag must not be empty"));
        }

        let mut text = String::with_capacity(line.len());
        let mut spans = Vec::new();

        for (index, chunk) in line.split_whitespace().enumerate() {
            if index > 0 {
                text.push(' ');
            }
            for token in chunk.split(split_tag) {
                if token.is_empty() {
                    return Err(EvalError::parse(
                        0,
                        format!("empty token around '{}' in chunk '{}'", split_tag, chunk),
                    ));
                }
                let start = text.len();
                text.push_str(token);
                spans.push(Span::from_range(start, text.len()));
            }
        }

        Ok(Self { text, spans })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Token strings covered by the spans, in order
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|span| span.covered_text(&self.text).unwrap_or_default())
    }

    /// Render back to the annotated line form
    ///
    /// Adjacent spans are joined by `split_tag`, separated spans by one space.
    pub fn to_annotated(&self, split_tag: &str) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut previous_end = None;

        for (span, token) in self.spans.iter().zip(self.tokens()) {
            match previous_end {
                Some(end) if end == span.start() => out.push_str(split_tag),
                Some(_) => out.push(' '),
                None => {}
            }
            out.push_str(token);
            previous_end = Some(span.end());
        }
        out
    }

    pub fn into_parts(self) -> (String, Vec<Span>) {
        (self.text, self.spans)
    }
}

impl fmt::Display for TokenSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_annotated(DEFAULT_SPLIT_TAG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_split_tags() {
        let sample = TokenSample::parse("Hello<SPLIT>, world<SPLIT>!", DEFAULT_SPLIT_TAG).unwrap();

        assert_eq!(sample.text(), "Hello, world!");
        assert_eq!(
            sample.tokens().collect::<Vec<_>>(),
            vec!["Hello", ",", "world", "!"]
        );
        assert_eq!(sample.spans()[1], Span::new(5, 6).unwrap());
        assert_eq!(sample.spans()[2], Span::new(7, 12).unwrap());
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let sample = TokenSample::parse("  a \t b  ", DEFAULT_SPLIT_TAG).unwrap();
        assert_eq!(sample.text(), "a b");
        assert_eq!(sample.spans().len(), 2);
    }

    #[test]
    fn test_parse_rejects_empty_token() {
        let err = TokenSample::parse("<SPLIT>oops", DEFAULT_SPLIT_TAG).unwrap_err();
        assert!(matches!(err, EvalError::Parse { .. }));

        let err = TokenSample::parse("a<SPLIT><SPLIT>b", DEFAULT_SPLIT_TAG).unwrap_err();
        assert!(matches!(err, EvalError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_split_tag() {
        assert!(matches!(
            TokenSample::parse("a b", ""),
            Err(EvalError::Config(_))
        ));
    }

    #[test]
    fn test_to_annotated_inverts_parse() {
        let line = "Mr<SPLIT>. Smith paid $<SPLIT>3<SPLIT>.";
        let sample = TokenSample::parse(line, DEFAULT_SPLIT_TAG).unwrap();
        assert_eq!(sample.to_annotated(DEFAULT_SPLIT_TAG), line);
        assert_eq!(sample.to_string(), line);
    }

    #[test]
    fn test_new_rejects_out_of_bounds_span() {
        let err = TokenSample::new("abc", vec![Span::new(1, 5).unwrap()]).unwrap_err();
        assert!(matches!(err, EvalError::SpanOutOfBounds { text_len: 3, .. }));
    }

    #[test]
    fn test_equality_is_ordered() {
        let a = TokenSample::new(
            "ab cd",
            vec![Span::new(0, 2).unwrap(), Span::new(3, 5).unwrap()],
        )
        .unwrap();
        let b = TokenSample::new(
            "ab cd",
            vec![Span::new(3, 5).unwrap(), Span::new(0, 2).unwrap()],
        )
        .unwrap();

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_json_round_trip_validates() {
        let sample: TokenSample =
            serde_json::from_str(r#"{"text":"ab cd","spans":[{"start":0,"end":2},{"start":3,"end":5}]}"#)
                .unwrap();
        assert_eq!(sample.tokens().collect::<Vec<_>>(), vec!["ab", "cd"]);

        let bad: Result<TokenSample, _> =
            serde_json::from_str(r#"{"text":"ab","spans":[{"start":0,"end":9}]}"#);
        assert!(bad.is_err());
    }
}
