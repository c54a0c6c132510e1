//! Tokenization abstraction
//!
//! Every comparison method implements [`TextTokenizer`], so the orchestrator
//! can treat the in-process splitters and the model-backed tokenizers alike.

use async_trait::async_trait;

use crate::error::TokenizerResult;

/// Trait for a tokenization method taking part in a comparison
#[async_trait]
pub trait TextTokenizer: Send + Sync {
    /// Name reported in the `method` field of a result
    fn method(&self) -> &str;

    /// Make sure any model artifact is loaded.
    ///
    /// Called before [`TextTokenizer::tokenize`] so loading time is not
    /// counted as tokenization time.
    async fn prepare(&self) -> TokenizerResult<()> {
        Ok(())
    }

    /// Split text into tokens, in the order the method produces them
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>>;
}
