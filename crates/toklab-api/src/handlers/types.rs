//! Request and response types for the tokenization handlers

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use toklab_tokenizers::{ComparisonService, TokenizationResult};
use utoipa::ToSchema;

/// Application state shared by the handlers
pub struct AppState {
    pub comparison: Arc<ComparisonService>,
}

impl AppState {
    pub fn new(comparison: Arc<ComparisonService>) -> Self {
        Self { comparison }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Text to run through every tokenization method
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TextInput {
    /// Input text. May be empty.
    #[schema(
        example = "The couch has accepted me as one of its own, and I can't betray its trust."
    )]
    pub text: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Tokens produced by one method
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenizationResponse {
    /// Method name: Regex, NLTK, spaCy, BERT or tiktoken
    #[schema(example = "Regex")]
    pub method: String,

    /// Tokens in the order they appear in the text
    #[schema(example = json!(["Hola", ",", "mundo", "!"]))]
    pub tokens: Vec<String>,

    /// Wall-clock time spent tokenizing, in milliseconds
    #[schema(example = 0.042)]
    pub execution_time: f64,

    /// Always equal to the length of `tokens`
    #[schema(example = 4)]
    pub token_count: usize,
}

impl From<TokenizationResult> for TokenizationResponse {
    fn from(result: TokenizationResult) -> Self {
        Self {
            method: result.method,
            tokens: result.tokens,
            execution_time: result.execution_time,
            token_count: result.token_count,
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}
