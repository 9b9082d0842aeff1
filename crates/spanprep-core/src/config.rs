//! Configuration for a preparation run.
//!
//! File locations and the split ratio are passed explicitly through the
//! pipeline instead of living in module-level constants.

use std::path::{Path, PathBuf};

/// File locations and split ratio for one corpus preparation run.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    /// The labeled BIO corpus to read.
    pub corpus: PathBuf,
    /// Output artifact for the training subset.
    pub train_out: PathBuf,
    /// Output artifact for the development subset.
    pub dev_out: PathBuf,
    /// Fraction of examples assigned to the training subset, in (0, 1).
    pub split_ratio: f64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("labeled_telegram_product_price_location.txt"),
            train_out: PathBuf::from("data/train.jsonl"),
            dev_out: PathBuf::from("data/dev.jsonl"),
            split_ratio: 0.8,
        }
    }
}

impl PrepareConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the corpus path.
    pub fn with_corpus(mut self, corpus: impl Into<PathBuf>) -> Self {
        self.corpus = corpus.into();
        self
    }

    /// Place both output artifacts under the given directory.
    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.train_out = dir.join("train.jsonl");
        self.dev_out = dir.join("dev.jsonl");
        self
    }

    /// Set the train/dev split ratio.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
        self
    }
}
