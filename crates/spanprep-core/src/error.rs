use thiserror::Error;

/// Errors that can occur during spanprep core operations.
#[derive(Debug, Error)]
pub enum SpanprepError {
    /// Reading the corpus or writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document collection could not be (de)serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The train/dev split ratio must lie strictly between 0 and 1.
    #[error("invalid split ratio {0}: expected a value in (0, 1)")]
    InvalidSplitRatio(f64),

    /// The external tokenizer failed to load or to segment text.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A trained model artifact could not be loaded.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Running the trained model over an input failed.
    #[error("inference error: {0}")]
    Inference(String),
}

/// Result type alias for spanprep operations.
pub type Result<T> = std::result::Result<T, SpanprepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SpanprepError::InvalidSplitRatio(1.5);
        assert_eq!(
            err.to_string(),
            "invalid split ratio 1.5: expected a value in (0, 1)"
        );

        let err = SpanprepError::ModelLoad("missing weights".into());
        assert!(err.to_string().contains("missing weights"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpanprepError>();
    }
}
