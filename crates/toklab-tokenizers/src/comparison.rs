//! Comparison orchestrator
//!
//! Runs every tokenizer on the same text, one after the other, and collects
//! the tokens with their timing. The output order is the registration order.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use toklab_core::problemdetails::{self, Problem};
use tracing::{debug, error};

use crate::bpe::BpeTokenizer;
use crate::error::TokenizerError;
use crate::pattern::RegexTokenizer;
use crate::pipeline::{LanguageModel, PipelineTokenizer};
use crate::timing::measure;
use crate::tokenizer::TextTokenizer;
use crate::treebank::TreebankTokenizer;
use crate::wordpiece::BertTokenizer;

/// Tokens produced by one method for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenizationResult {
    pub method: String,
    pub tokens: Vec<String>,
    /// Elapsed wall time in milliseconds
    pub execution_time: f64,
    pub token_count: usize,
}

impl TokenizationResult {
    pub fn new(method: impl Into<String>, tokens: Vec<String>, execution_time: f64) -> Self {
        Self {
            method: method.into(),
            token_count: tokens.len(),
            tokens,
            execution_time,
        }
    }
}

/// A tokenizer failed; earlier results of the same comparison are dropped
#[derive(Debug, thiserror::Error)]
#[error("Error en tokenización {method}: {source}")]
pub struct ComparisonError {
    pub method: String,
    #[source]
    pub source: TokenizerError,
}

impl From<ComparisonError> for Problem {
    fn from(error: ComparisonError) -> Self {
        problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR).with_detail(error.to_string())
    }
}

pub struct ComparisonService {
    tokenizers: Vec<Arc<dyn TextTokenizer>>,
}

impl ComparisonService {
    pub fn new(tokenizers: Vec<Arc<dyn TextTokenizer>>) -> Self {
        Self { tokenizers }
    }

    /// The five methods in their fixed order: Regex, NLTK, spaCy, BERT, tiktoken
    pub fn standard(language_model: LanguageModel, bert: BertTokenizer, bpe: BpeTokenizer) -> Self {
        let tokenizers: Vec<Arc<dyn TextTokenizer>> = vec![
            Arc::new(RegexTokenizer::new()),
            Arc::new(TreebankTokenizer::new()),
            Arc::new(PipelineTokenizer::new(language_model)),
            Arc::new(bert),
            Arc::new(bpe),
        ];
        Self::new(tokenizers)
    }

    pub fn methods(&self) -> Vec<&str> {
        self.tokenizers.iter().map(|t| t.method()).collect()
    }

    /// Load model artifacts ahead of the first request
    pub async fn warm_up(&self) -> Result<(), ComparisonError> {
        for tokenizer in &self.tokenizers {
            tokenizer
                .prepare()
                .await
                .map_err(|source| ComparisonError {
                    method: tokenizer.method().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    pub async fn compare(&self, text: &str) -> Result<Vec<TokenizationResult>, ComparisonError> {
        let mut results = Vec::with_capacity(self.tokenizers.len());

        for tokenizer in &self.tokenizers {
            let method = tokenizer.method();
            let fail = |source: TokenizerError| {
                error!("Tokenization with {} failed: {}", method, source);
                ComparisonError {
                    method: method.to_string(),
                    source,
                }
            };

            tokenizer.prepare().await.map_err(fail)?;
            let (tokens, elapsed_ms) = measure(|| tokenizer.tokenize(text));
            let tokens = tokens.map_err(fail)?;

            debug!(
                "{} produced {} tokens in {:.3} ms",
                method,
                tokens.len(),
                elapsed_ms
            );
            results.push(TokenizationResult::new(method, tokens, elapsed_ms));
        }

        Ok(results)
    }
}
