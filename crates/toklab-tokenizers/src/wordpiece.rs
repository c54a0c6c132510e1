//! Transformer subword tokenizer (BERT WordPiece)
//!
//! The model artifact is resolved lazily: either a local `vocab.txt` or a
//! repository on the Hugging Face Hub. Downloads run on the blocking pool and
//! the loaded tokenizer is cached; a failed load is retried on the next call.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::models::ModelWrapper;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::normalizers::NormalizerWrapper;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::pre_tokenizers::PreTokenizerWrapper;
use tokenizers::Tokenizer;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{ModelLoadError, TokenizerError, TokenizerResult};
use crate::tokenizer::TextTokenizer;

pub const BERT_METHOD: &str = "BERT";

/// Spanish uncased BERT used by default
pub const DEFAULT_BERT_MODEL: &str = "dccuchile/bert-base-spanish-wwm-uncased";

/// Where the WordPiece vocabulary comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Repository id on the Hugging Face Hub
    Hub(String),
    /// Local `vocab.txt`, one token per line
    VocabFile(PathBuf),
}

impl ModelSource {
    pub fn describe(&self) -> String {
        match self {
            ModelSource::Hub(repo) => repo.clone(),
            ModelSource::VocabFile(path) => path.display().to_string(),
        }
    }
}

impl Default for ModelSource {
    fn default() -> Self {
        ModelSource::Hub(DEFAULT_BERT_MODEL.to_string())
    }
}

/// Build an uncased BERT tokenizer that keeps accents, from a vocabulary file
pub fn tokenizer_from_vocab(path: &Path) -> Result<Tokenizer, ModelLoadError> {
    let vocab = path.to_str().ok_or_else(|| ModelLoadError::Artifact {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    let model = WordPiece::from_file(vocab)
        .unk_token("[UNK]".to_string())
        .continuing_subword_prefix("##".to_string())
        .build()
        .map_err(|e| ModelLoadError::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // Uncased, accents kept
    let mut tokenizer = Tokenizer::new(ModelWrapper::WordPiece(model));
    tokenizer.with_normalizer(NormalizerWrapper::BertNormalizer(BertNormalizer::new(
        true,
        true,
        Some(false),
        true,
    )));
    tokenizer.with_pre_tokenizer(PreTokenizerWrapper::BertPreTokenizer(BertPreTokenizer));
    Ok(tokenizer)
}

/// Fetch a tokenizer from the Hub, preferring `tokenizer.json` over `vocab.txt`.
///
/// Blocking: performs network and disk IO.
pub fn download_tokenizer(repo_id: &str) -> Result<Tokenizer, ModelLoadError> {
    let download_error = |reason: String| ModelLoadError::Download {
        model: repo_id.to_string(),
        reason,
    };

    let api = hf_hub::api::sync::Api::new().map_err(|e| download_error(e.to_string()))?;
    let repo = api.model(repo_id.to_string());

    match repo.get("tokenizer.json") {
        Ok(path) => {
            debug!("Using tokenizer.json for {}", repo_id);
            return Tokenizer::from_file(&path).map_err(|e| ModelLoadError::Artifact {
                path,
                reason: e.to_string(),
            });
        }
        Err(e) => debug!("No tokenizer.json for {} ({}), trying vocab.txt", repo_id, e),
    }

    let vocab = repo
        .get("vocab.txt")
        .map_err(|e| download_error(e.to_string()))?;
    tokenizer_from_vocab(&vocab)
}

pub struct BertTokenizer {
    source: ModelSource,
    tokenizer: OnceCell<Tokenizer>,
}

impl BertTokenizer {
    pub fn new(source: ModelSource) -> Self {
        Self {
            source,
            tokenizer: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.tokenizer.initialized()
    }

    async fn load(source: ModelSource) -> Result<Tokenizer, ModelLoadError> {
        info!("Loading BERT tokenizer from {}", source.describe());
        let result = tokio::task::spawn_blocking(move || match &source {
            ModelSource::Hub(repo) => download_tokenizer(repo),
            ModelSource::VocabFile(path) => tokenizer_from_vocab(path),
        })
        .await
        .map_err(|e| ModelLoadError::Join(e.to_string()))?;

        if let Err(e) = &result {
            warn!("BERT tokenizer unavailable: {}", e);
        }
        result
    }
}

#[async_trait]
impl TextTokenizer for BertTokenizer {
    fn method(&self) -> &str {
        BERT_METHOD
    }

    async fn prepare(&self) -> TokenizerResult<()> {
        self.tokenizer
            .get_or_try_init(|| Self::load(self.source.clone()))
            .await?;
        Ok(())
    }

    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>> {
        let tokenizer = self.tokenizer.get().ok_or_else(|| {
            TokenizerError::TokenizationFailed(format!(
                "tokenizer for '{}' is not loaded",
                self.source.describe()
            ))
        })?;

        let encoding = tokenizer
            .encode(text, false)
            .map_err(|e| TokenizerError::TokenizationFailed(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_vocab(dir: &Path) -> PathBuf {
        let path = dir.join("vocab.txt");
        let vocab = [
            "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "hola", ",", "!", "mundo", "tok",
            "##en", "##iza", "##cion", "canción", "##es",
        ];
        std::fs::write(&path, vocab.join("\n")).unwrap();
        path
    }

    #[tokio::test]
    async fn test_wordpiece_from_vocab_file() {
        let dir = tempfile::tempdir().unwrap();
        let bert = BertTokenizer::new(ModelSource::VocabFile(write_vocab(dir.path())));

        assert!(!bert.is_loaded());
        bert.prepare().await.unwrap();
        assert!(bert.is_loaded());

        let tokens = bert.tokenize("Hola, Mundo! Tokenizacion").unwrap();
        assert_eq!(
            tokens,
            vec!["hola", ",", "mundo", "!", "tok", "##en", "##iza", "##cion"]
        );
    }

    #[tokio::test]
    async fn test_accents_are_kept_and_unknown_words_map_to_unk() {
        let dir = tempfile::tempdir().unwrap();
        let bert = BertTokenizer::new(ModelSource::VocabFile(write_vocab(dir.path())));
        bert.prepare().await.unwrap();

        assert_eq!(bert.tokenize("Canciónes xyz").unwrap(), vec!["canción", "##es", "[UNK]"]);
        assert!(bert.tokenize("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_vocab_fails_and_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        let bert = BertTokenizer::new(ModelSource::VocabFile(path.clone()));

        assert!(bert.prepare().await.is_err());
        assert!(!bert.is_loaded());

        write_vocab(dir.path());
        bert.prepare().await.unwrap();
        assert!(bert.is_loaded());
    }

    #[test]
    fn test_tokenize_before_prepare_fails() {
        let bert = BertTokenizer::new(ModelSource::default());
        let err = bert.tokenize("hola").unwrap_err();
        assert!(err.to_string().contains(DEFAULT_BERT_MODEL));
    }
}
