//! # Text Segmentation
//!
//! The converter re-tokenizes reconstructed text before aligning entity
//! spans to token boundaries. Segmentation is a pluggable collaborator:
//! the only capability required is "split text into tokens with known byte
//! offsets", expressed by the [`Segmenter`] trait.
//!
//! Two implementations are provided: an offset-preserving whitespace
//! segmenter (sufficient for text that was reconstructed by joining tokens
//! with single spaces) and a wrapper around a Hugging Face `tokenizer.json`,
//! for aligning against the tokenizer an actual model will be trained with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer as HfTokenizer;

use crate::error::{Result, SpanprepError};

/// A token produced by a segmenter, with byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text, sliced verbatim from the source.
    pub text: String,
    /// Start byte offset in the source text (inclusive).
    pub start: usize,
    /// End byte offset in the source text (exclusive).
    pub end: usize,
    /// Sequential token index.
    pub index: usize,
}

/// Segments text into offset-bearing tokens.
pub trait Segmenter {
    /// Split `text` into tokens covering non-overlapping byte ranges,
    /// in left-to-right order.
    fn segment(&self, text: &str) -> Result<Vec<Token>>;
}

/// Whitespace segmentation that preserves original offsets.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceSegmenter;

impl WhitespaceSegmenter {
    /// Create a new whitespace segmenter.
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut current_start: Option<usize> = None;

        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = current_start.take() {
                    tokens.push(Token {
                        text: text[start..idx].to_string(),
                        start,
                        end: idx,
                        index: tokens.len(),
                    });
                }
            } else if current_start.is_none() {
                current_start = Some(idx);
            }
        }

        if let Some(start) = current_start {
            tokens.push(Token {
                text: text[start..].to_string(),
                start,
                end: text.len(),
                index: tokens.len(),
            });
        }

        Ok(tokens)
    }
}

/// Segmenter backed by a Hugging Face tokenizer file.
pub struct HfSegmenter {
    tokenizer: HfTokenizer,
}

impl HfSegmenter {
    /// Load a segmenter from a `tokenizer.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let tokenizer = HfTokenizer::from_file(path.as_ref())
            .map_err(|e| SpanprepError::Tokenizer(e.to_string()))?;
        Ok(Self { tokenizer })
    }
}

impl Segmenter for HfSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Token>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| SpanprepError::Tokenizer(e.to_string()))?;

        let mut tokens = Vec::new();
        for &(start, end) in encoding.get_offsets() {
            // Special tokens carry zero-width offsets.
            if start == end {
                continue;
            }
            let Some(slice) = text.get(start..end) else {
                continue;
            };
            tokens.push(Token {
                text: slice.to_string(),
                start,
                end,
                index: tokens.len(),
            });
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_segment_basic() {
        let tokens = WhitespaceSegmenter::new()
            .segment("Phone price 500 birr")
            .unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text, "Phone");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 5));
        assert_eq!(tokens[3].text, "birr");
        assert_eq!((tokens[3].start, tokens[3].end), (16, 20));
        assert_eq!(tokens[3].index, 3);
    }

    #[test]
    fn whitespace_segment_collapses_runs() {
        let tokens = WhitespaceSegmenter::new().segment("  a\t b \n").unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn whitespace_segment_empty() {
        assert!(WhitespaceSegmenter::new().segment("").unwrap().is_empty());
        assert!(WhitespaceSegmenter::new().segment("   ").unwrap().is_empty());
    }

    #[test]
    fn whitespace_segment_multibyte_offsets() {
        let text = "ዋጋ 500 ብር";
        let tokens = WhitespaceSegmenter::new().segment(text).unwrap();

        assert_eq!(tokens.len(), 3);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn hf_segmenter_missing_file_is_an_error() {
        let result = HfSegmenter::from_file("does/not/exist/tokenizer.json");
        assert!(matches!(result, Err(SpanprepError::Tokenizer(_))));
    }
}
