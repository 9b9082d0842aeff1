//! # CoNLL-Like Corpus Parser
//!
//! Reads a token-per-line BIO-tagged corpus and reconstructs, for every
//! sentence, the full text plus byte-offset entity spans merged across
//! `B-`/`I-` tag runs.
//!
//! Input format: one `TOKEN TAG` pair per line (first whitespace run is the
//! separator), blank line between sentences, `#`-prefixed comment lines.
//! Data problems are reported as `tracing` warnings and skipped; parsing
//! always runs to completion and returns whatever examples were assembled.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::tags::BioTag;
use crate::types::{EntitySpan, Example};

/// Parse a corpus file into examples.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Example>> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse a corpus from any buffered reader.
///
/// A sentence is flushed on every blank line, and once more at end of
/// input if the corpus does not end with a trailing blank line.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    let mut pairs: Vec<(String, BioTag)> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !pairs.is_empty() {
                examples.push(assemble_example(std::mem::take(&mut pairs)));
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        match line.split_once(char::is_whitespace) {
            Some((token, tag)) => {
                pairs.push((token.to_string(), BioTag::parse(tag.trim_start())));
            }
            None => {
                warn!("skipping malformed corpus line (expected 'TOKEN TAG'): {line:?}");
            }
        }
    }

    // Flush a pending sentence when the file has no trailing blank line.
    if !pairs.is_empty() {
        examples.push(assemble_example(pairs));
    }

    Ok(examples)
}

/// Build one example from a sentence's (token, tag) pairs.
fn assemble_example(pairs: Vec<(String, BioTag)>) -> Example {
    let text = pairs
        .iter()
        .map(|(token, _)| token.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let entities = align_entities(&text, &pairs);
    Example { text, entities }
}

/// Walk tokens left to right, locating each one in the reconstructed text
/// and merging `B-`/`I-` runs into contiguous spans.
///
/// The cursor-based first-occurrence search is a heuristic, not a proven
/// re-alignment: it is exact as long as every token is found at its joined
/// position, and a lookup miss is recovered by jumping the cursor past the
/// next joining space so later tokens can still line up.
fn align_entities(text: &str, pairs: &[(String, BioTag)]) -> Vec<EntitySpan> {
    let mut entities: Vec<EntitySpan> = Vec::new();
    let mut current_idx = 0usize;

    for (token, tag) in pairs {
        let start = match find_from(text, token, current_idx) {
            Some(pos) => pos,
            None => {
                warn!("could not find token {token:?} from byte {current_idx} in text {text:?}");
                current_idx = match find_from(text, " ", current_idx) {
                    Some(space) => space + 1,
                    None => text.len() + 1,
                };
                continue;
            }
        };
        let end = start + token.len();

        match tag {
            BioTag::Begin(ty) => {
                entities.push(EntitySpan::new(start, end, ty.clone()));
            }
            BioTag::Inside(ty) => {
                // Extend the previous span only when it has the same type and
                // ends exactly one character (the joining space) before this
                // token begins. An `I-` tag with no compatible predecessor
                // opens a new span, tolerating corpora with missing `B-`
                // openers.
                match entities.last_mut() {
                    Some(last) if last.label == *ty && last.end + 1 == start => {
                        last.end = end;
                    }
                    _ => entities.push(EntitySpan::new(start, end, ty.clone())),
                }
            }
            BioTag::Outside => {}
        }

        // Move past the token and its trailing joining space.
        current_idx = end + 1;
    }

    entities
}

/// First occurrence of `needle` in `haystack` at or after byte `from`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|pos| from + pos)
}
