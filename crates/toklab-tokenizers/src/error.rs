//! Error types for tokenization and model loading

use std::path::PathBuf;

/// Errors raised while loading a model artifact or rule set
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Can't load tokenizer for '{model}': {reason}")]
    Download { model: String, reason: String },

    #[error("Invalid model artifact {}: {reason}", path.display())]
    Artifact { path: PathBuf, reason: String },

    #[error("Can't find model '{0}'")]
    UnknownModel(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid language model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to load encoding {name}: {reason}")]
    Encoding { name: String, reason: String },

    #[error("Model loader task failed: {0}")]
    Join(String),
}

/// Error type for tokenization operations
#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("{0}")]
    ModelUnavailable(#[from] ModelLoadError),

    #[error("Encountered text corresponding to disallowed special token '{0}'.")]
    DisallowedSpecialToken(String),

    #[error("{0}")]
    TokenizationFailed(String),
}

/// Result type for tokenizer operations
pub type TokenizerResult<T> = Result<T, TokenizerError>;
