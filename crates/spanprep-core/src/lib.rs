//! # spanprep-core
//!
//! Converts a manually labeled token-per-line entity corpus (CoNLL-like
//! B-/I-/O tagging) into character-span annotated train/dev datasets, and
//! provides the model-loading glue used to smoke-test a trained NER model.
//!
//! The pipeline is a single-pass, synchronous chain of stages, each one
//! consuming the complete output of the previous stage:
//!
//! 1. **Parsing** ([`conll`]): sentences are reconstructed from tagged
//!    lines; entity spans are recovered as byte offsets and merged across
//!    `B-`/`I-` tag runs.
//! 2. **Splitting** ([`split`]): the ordered examples are partitioned into
//!    train/dev subsets by a fixed ratio, no shuffling.
//! 3. **Conversion** ([`convert`]): each subset is re-tokenized by a
//!    [`segment::Segmenter`] and spans are contracted onto token
//!    boundaries, then serialized as JSON-lines artifacts.
//!
//! Data problems (malformed lines, tokens that cannot be re-located,
//! spans that fail to align) are reported as `tracing` warnings and
//! recovered locally; a run never aborts on corpus content.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanprep_core::conll::parse_reader;
//!
//! let corpus = "Phone\tB-PRODUCT\nprice\tO\n500\tB-PRICE\nbirr\tI-PRICE\n\n";
//! let examples = parse_reader(corpus.as_bytes()).unwrap();
//!
//! assert_eq!(examples[0].text, "Phone price 500 birr");
//! assert_eq!(examples[0].entities.len(), 2);
//! ```

pub mod config;
pub mod conll;
pub mod convert;
pub mod error;
pub mod model;
pub mod segment;
pub mod split;
pub mod tags;
pub mod types;

// Re-export primary API
pub use config::PrepareConfig;
pub use conll::{parse_file, parse_reader};
pub use convert::{Doc, align_span, convert_examples, read_docs, write_docs};
pub use error::{Result, SpanprepError};
pub use model::{Entity, NerModel};
pub use segment::{HfSegmenter, Segmenter, Token, WhitespaceSegmenter};
pub use split::split_examples;
pub use tags::BioTag;
pub use types::{EntitySpan, Example};
