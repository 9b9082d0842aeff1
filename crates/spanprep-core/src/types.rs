//! Core data types shared across the preparation pipeline.

use serde::{Deserialize, Serialize};

/// A contiguous entity annotation over an example's text.
///
/// `start` and `end` are byte offsets into the text, end exclusive. Spans
/// are always derived from whole tokens, so both offsets sit on UTF-8
/// character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Byte offset of the first character of the span (inclusive).
    pub start: usize,
    /// Byte offset one past the last character of the span (exclusive).
    pub end: usize,
    /// Entity type, e.g. `PRODUCT`, `PRICE`, `LOCATION`.
    pub label: String,
}

impl EntitySpan {
    /// Creates a new span.
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// The substring of `text` covered by this span.
    ///
    /// Returns `None` if the span does not fit the given text.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// One sentence reconstructed from the corpus, with its entity spans.
///
/// `text` is the single-space join of the sentence's tokens and is never
/// modified after the example is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Reconstructed sentence text.
    pub text: String,
    /// Entity spans in left-to-right order.
    pub entities: Vec<EntitySpan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_slice() {
        let span = EntitySpan::new(0, 5, "PRODUCT");
        assert_eq!(span.slice("Phone price"), Some("Phone"));
    }

    #[test]
    fn span_slice_out_of_bounds() {
        let span = EntitySpan::new(4, 20, "PRODUCT");
        assert_eq!(span.slice("Phone"), None);
    }

    #[test]
    fn example_serialization_roundtrip() {
        let example = Example {
            text: "Phone price 500 birr".into(),
            entities: vec![
                EntitySpan::new(0, 5, "PRODUCT"),
                EntitySpan::new(12, 20, "PRICE"),
            ],
        };

        let json = serde_json::to_string(&example).unwrap();
        let back: Example = serde_json::from_str(&json).unwrap();
        assert_eq!(example, back);
    }
}
