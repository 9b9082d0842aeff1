//! # Span-to-Document Converter
//!
//! Turns parsed examples into token-aligned annotated documents ready for a
//! downstream trainer. Raw character spans rarely disagree with the
//! segmenter here, but when they do each span is contracted to the largest
//! token-boundary-aligned sub-span it fully contains, and dropped with a
//! diagnostic if no such sub-span exists. The document itself is always
//! produced.
//!
//! Document collections are serialized as JSON lines, one document per
//! line, whole-file overwrite.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::segment::{Segmenter, Token};
use crate::types::{EntitySpan, Example};

/// A token-aligned annotated document, one per corpus example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    /// The example text, unchanged.
    pub text: String,
    /// Tokens produced by the segmenter, with byte offsets.
    pub tokens: Vec<Token>,
    /// Entity spans snapped to token boundaries.
    pub entities: Vec<EntitySpan>,
}

/// Contract a raw span onto token boundaries.
///
/// Returns the span covering every token fully contained in
/// `[span.start, span.end)`, or `None` when no token fits. Edges are only
/// ever shrunk, never grown.
pub fn align_span(tokens: &[Token], span: &EntitySpan) -> Option<EntitySpan> {
    let mut aligned_start = None;
    let mut aligned_end = None;

    for token in tokens {
        if token.start >= span.start && token.end <= span.end {
            if aligned_start.is_none() {
                aligned_start = Some(token.start);
            }
            aligned_end = Some(token.end);
        }
    }

    match (aligned_start, aligned_end) {
        (Some(start), Some(end)) if start < end => {
            Some(EntitySpan::new(start, end, span.label.clone()))
        }
        _ => None,
    }
}

/// Convert examples into documents using the given segmenter.
///
/// Spans that cannot be aligned are dropped with a warning; the document is
/// still emitted, possibly with fewer entities than were labeled.
pub fn convert_examples(examples: &[Example], segmenter: &dyn Segmenter) -> Result<Vec<Doc>> {
    let mut docs = Vec::with_capacity(examples.len());

    for example in examples {
        let tokens = segmenter.segment(&example.text)?;

        let mut entities = Vec::with_capacity(example.entities.len());
        for span in &example.entities {
            match align_span(&tokens, span) {
                Some(aligned) => entities.push(aligned),
                None => {
                    warn!(
                        "dropping entity {:?} ({}) in text {:?}: no token-aligned sub-span",
                        span.slice(&example.text).unwrap_or(""),
                        span.label,
                        example.text
                    );
                }
            }
        }

        docs.push(Doc {
            text: example.text.clone(),
            tokens,
            entities,
        });
    }

    Ok(docs)
}

/// Write a document collection as a JSON-lines artifact.
///
/// An empty collection produces a valid, empty file.
pub fn write_docs<P: AsRef<Path>>(path: P, docs: &[Doc]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for doc in docs {
        let json = serde_json::to_string(doc)?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSON-lines document collection back from disk.
pub fn read_docs<P: AsRef<Path>>(path: P) -> Result<Vec<Doc>> {
    let contents = std::fs::read_to_string(path)?;
    let mut docs = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        docs.push(serde_json::from_str(line)?);
    }
    Ok(docs)
}
