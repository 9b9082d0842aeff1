//! # Trained Model Loading and Entity Prediction
//!
//! Glue over the external ML stack for smoke-testing a trained NER model.
//! A model directory holds `tokenizer.json`, `config.json` (DistilBERT
//! config plus the `id2label` map) and `model.safetensors` (encoder weights
//! plus a `classifier` token-classification head). Predicted per-token BIO
//! labels are assembled into entities over the encoding's byte offsets.

use std::path::{Path, PathBuf};

use candle_core::{D, DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config as BertConfig, DistilBertModel};
use serde::Serialize;
use tokenizers::Tokenizer as HfTokenizer;

use crate::error::{Result, SpanprepError};
use crate::tags::BioTag;

/// DistilBERT hidden dimension.
const HIDDEN_SIZE: usize = 768;

/// An entity recognized by the trained model.
///
/// Offsets are byte offsets into the input string, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// The covered input text.
    pub text: String,
    /// Entity type, e.g. `PRODUCT`.
    pub label: String,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

/// DistilBERT encoder with a linear token-classification head.
struct TokenClassifier {
    distilbert: DistilBertModel,
    classifier: Linear,
}

impl TokenClassifier {
    fn load(vb: VarBuilder, config: &BertConfig, num_labels: usize) -> candle_core::Result<Self> {
        let distilbert = DistilBertModel::load(vb.pp("distilbert"), config)?;
        let classifier = candle_nn::linear(HIDDEN_SIZE, num_labels, vb.pp("classifier"))?;
        Ok(Self {
            distilbert,
            classifier,
        })
    }

    /// Per-token label logits, shape `[batch, seq_len, num_labels]`.
    fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
        let hidden_states = self.distilbert.forward(input_ids, attention_mask)?;
        self.classifier.forward(&hidden_states)
    }
}

/// A trained NER model ready for inference.
pub struct NerModel {
    tokenizer: HfTokenizer,
    classifier: TokenClassifier,
    /// Label id to tag string, from the checkpoint's `id2label` map.
    labels: Vec<String>,
    device: Device,
}

impl NerModel {
    /// Locate a model directory under `models_dir`, preferring the best
    /// checkpoint over the last one. Returns `None` when neither exists.
    pub fn locate(models_dir: &Path) -> Option<PathBuf> {
        let best = models_dir.join("model-best");
        if best.exists() {
            return Some(best);
        }
        let last = models_dir.join("model-last");
        if last.exists() {
            return Some(last);
        }
        None
    }

    /// Load a model from a checkpoint directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let device = Device::Cpu;

        let tokenizer_path = dir.join("tokenizer.json");
        let tokenizer = HfTokenizer::from_file(&tokenizer_path).map_err(|e| {
            SpanprepError::ModelLoad(format!("tokenizer {}: {e}", tokenizer_path.display()))
        })?;

        let config_path = dir.join("config.json");
        let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
            SpanprepError::ModelLoad(format!("config {}: {e}", config_path.display()))
        })?;
        let labels = parse_labels(&config_str)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| SpanprepError::ModelLoad(format!("config.json: {e}")))?;

        let weights_path = dir.join("model.safetensors");
        if !weights_path.exists() {
            return Err(SpanprepError::ModelLoad(format!(
                "missing weights at {}",
                weights_path.display()
            )));
        }
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
        }
        .map_err(|e| SpanprepError::ModelLoad(e.to_string()))?;

        let classifier = TokenClassifier::load(vb, &config, labels.len())
            .map_err(|e| SpanprepError::ModelLoad(e.to_string()))?;

        Ok(Self {
            tokenizer,
            classifier,
            labels,
            device,
        })
    }

    /// Run the model over one input and return the recognized entities.
    pub fn predict(&self, input: &str) -> Result<Vec<Entity>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| SpanprepError::Inference(e.to_string()))?;
        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let input_ids = Tensor::new(ids, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| SpanprepError::Inference(e.to_string()))?;
        let attention_mask = Tensor::ones_like(&input_ids)
            .map_err(|e| SpanprepError::Inference(e.to_string()))?;

        let logits = self
            .classifier
            .forward(&input_ids, &attention_mask)
            .map_err(|e| SpanprepError::Inference(e.to_string()))?;

        let pred_ids: Vec<u32> = logits
            .argmax(D::Minus1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1())
            .map_err(|e| SpanprepError::Inference(e.to_string()))?;

        Ok(self.assemble_entities(input, encoding.get_offsets(), &pred_ids))
    }

    /// Merge per-token BIO predictions into entities over byte offsets.
    fn assemble_entities(
        &self,
        input: &str,
        offsets: &[(usize, usize)],
        pred_ids: &[u32],
    ) -> Vec<Entity> {
        let mut entities = Vec::new();
        // (type, start, end) of the entity currently being extended.
        let mut open: Option<(String, usize, usize)> = None;

        for (i, &(start, end)) in offsets.iter().enumerate() {
            // Special tokens carry zero-width offsets.
            if start == end {
                continue;
            }

            let label = pred_ids
                .get(i)
                .and_then(|&id| self.labels.get(id as usize))
                .map(String::as_str)
                .unwrap_or("O");

            match BioTag::parse(label) {
                BioTag::Begin(ty) => {
                    close_entity(&mut entities, input, open.take());
                    open = Some((ty, start, end));
                }
                BioTag::Inside(ty) => match open {
                    Some((ref current, _, ref mut open_end)) if *current == ty => {
                        *open_end = end;
                    }
                    _ => {
                        close_entity(&mut entities, input, open.take());
                        open = Some((ty, start, end));
                    }
                },
                BioTag::Outside => {
                    close_entity(&mut entities, input, open.take());
                }
            }
        }

        close_entity(&mut entities, input, open.take());
        entities
    }
}

fn close_entity(entities: &mut Vec<Entity>, input: &str, open: Option<(String, usize, usize)>) {
    if let Some((label, start, end)) = open {
        if let Some(text) = input.get(start..end) {
            entities.push(Entity {
                text: text.to_string(),
                label,
                start,
                end,
            });
        }
    }
}

/// Extract the ordered label vocabulary from a checkpoint `config.json`.
fn parse_labels(config_json: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(config_json)?;
    let map = value
        .get("id2label")
        .and_then(|v| v.as_object())
        .ok_or_else(|| SpanprepError::ModelLoad("config.json has no id2label map".into()))?;

    let mut labels = vec![String::new(); map.len()];
    for (key, val) in map {
        let idx: usize = key.parse().map_err(|_| {
            SpanprepError::ModelLoad(format!("invalid label id {key:?} in id2label"))
        })?;
        let label = val.as_str().ok_or_else(|| {
            SpanprepError::ModelLoad(format!("non-string label for id {key:?} in id2label"))
        })?;
        if idx >= labels.len() {
            labels.resize(idx + 1, String::new());
        }
        labels[idx] = label.to_string();
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn locate_prefers_best_over_last() {
        let root = std::env::temp_dir().join(format!("spanprep-locate-both-{}", std::process::id()));
        fs::create_dir_all(root.join("model-best")).unwrap();
        fs::create_dir_all(root.join("model-last")).unwrap();

        let found = NerModel::locate(&root).unwrap();
        fs::remove_dir_all(&root).unwrap();

        assert!(found.ends_with("model-best"));
    }

    #[test]
    fn locate_falls_back_to_last() {
        let root = std::env::temp_dir().join(format!("spanprep-locate-last-{}", std::process::id()));
        fs::create_dir_all(root.join("model-last")).unwrap();

        let found = NerModel::locate(&root).unwrap();
        fs::remove_dir_all(&root).unwrap();

        assert!(found.ends_with("model-last"));
    }

    #[test]
    fn locate_with_no_checkpoint_is_none() {
        let root = std::env::temp_dir().join(format!("spanprep-locate-none-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();

        let found = NerModel::locate(&root);
        fs::remove_dir_all(&root).unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn load_from_empty_directory_fails() {
        let root = std::env::temp_dir().join(format!("spanprep-load-empty-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();

        let result = NerModel::load(&root);
        fs::remove_dir_all(&root).unwrap();

        assert!(matches!(result, Err(SpanprepError::ModelLoad(_))));
    }

    #[test]
    fn parse_labels_from_config() {
        let config = r#"{"id2label": {"0": "O", "1": "B-PRODUCT", "2": "I-PRODUCT"}}"#;
        let labels = parse_labels(config).unwrap();
        assert_eq!(labels, vec!["O", "B-PRODUCT", "I-PRODUCT"]);
    }

    #[test]
    fn parse_labels_requires_id2label() {
        let err = parse_labels(r#"{"dim": 768}"#).unwrap_err();
        assert!(err.to_string().contains("id2label"));
    }

    #[test]
    fn parse_labels_rejects_non_numeric_ids() {
        let config = r#"{"id2label": {"zero": "O"}}"#;
        assert!(parse_labels(config).is_err());
    }
}
