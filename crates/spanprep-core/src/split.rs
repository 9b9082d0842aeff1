//! Deterministic train/dev partitioning of parsed examples.

use crate::error::{Result, SpanprepError};
use crate::types::Example;

/// Split examples into `(train, dev)` subsets.
///
/// `train` holds the first `floor(len * ratio)` examples and `dev` the
/// remainder, both in their original order. There is no shuffling, so the
/// split is reproducible for a given corpus.
pub fn split_examples(examples: Vec<Example>, ratio: f64) -> Result<(Vec<Example>, Vec<Example>)> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(SpanprepError::InvalidSplitRatio(ratio));
    }

    let cut = (examples.len() as f64 * ratio).floor() as usize;
    let mut train = examples;
    let dev = train.split_off(cut);
    Ok((train, dev))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_examples(n: usize) -> Vec<Example> {
        (0..n)
            .map(|i| Example {
                text: format!("example {i}"),
                entities: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn ten_examples_at_default_ratio() {
        let (train, dev) = split_examples(numbered_examples(10), 0.8).unwrap();

        assert_eq!(train.len(), 8);
        assert_eq!(dev.len(), 2);
        assert_eq!(train[0].text, "example 0");
        assert_eq!(train[7].text, "example 7");
        assert_eq!(dev[0].text, "example 8");
        assert_eq!(dev[1].text, "example 9");
    }

    #[test]
    fn split_preserves_order() {
        let (train, dev) = split_examples(numbered_examples(7), 0.5).unwrap();

        assert_eq!(train.len(), 3);
        assert_eq!(dev.len(), 4);
        for (i, example) in train.iter().chain(dev.iter()).enumerate() {
            assert_eq!(example.text, format!("example {i}"));
        }
    }

    #[test]
    fn empty_input_yields_two_empty_subsets() {
        let (train, dev) = split_examples(Vec::new(), 0.8).unwrap();
        assert!(train.is_empty());
        assert!(dev.is_empty());
    }

    #[test]
    fn single_example_goes_to_dev() {
        // floor(1 * 0.8) == 0, so the lone example lands in dev.
        let (train, dev) = split_examples(numbered_examples(1), 0.8).unwrap();
        assert!(train.is_empty());
        assert_eq!(dev.len(), 1);
    }

    #[test]
    fn ratio_bounds_are_rejected() {
        assert!(split_examples(numbered_examples(3), 0.0).is_err());
        assert!(split_examples(numbered_examples(3), 1.0).is_err());
        assert!(split_examples(numbered_examples(3), -0.2).is_err());
        assert!(split_examples(numbered_examples(3), f64::NAN).is_err());
    }
}
