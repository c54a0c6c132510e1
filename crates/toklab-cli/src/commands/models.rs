use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use toklab_tokenizers::pipeline::BUNDLED_MODEL;
use toklab_tokenizers::wordpiece::DEFAULT_BERT_MODEL;
use toklab_tokenizers::{BertTokenizer, BpeTokenizer, ComparisonService, LanguageModel, ModelSource};

/// Model artifacts used by the spaCy and BERT methods
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Rules for the spaCy method: a bundled model name or a JSON file
    #[arg(long, default_value = BUNDLED_MODEL, env = "TOKLAB_LANGUAGE_MODEL")]
    pub language_model: String,

    /// Hugging Face Hub repository of the BERT vocabulary
    #[arg(long, default_value = DEFAULT_BERT_MODEL, env = "TOKLAB_BERT_MODEL")]
    pub bert_model: String,

    /// Local WordPiece vocab.txt; skips the Hub download when set
    #[arg(long, env = "TOKLAB_BERT_VOCAB")]
    pub bert_vocab: Option<PathBuf>,
}

impl ModelArgs {
    pub fn bert_source(&self) -> ModelSource {
        match &self.bert_vocab {
            Some(path) => ModelSource::VocabFile(path.clone()),
            None => ModelSource::Hub(self.bert_model.clone()),
        }
    }

    /// Build the five tokenizers in their fixed order
    pub fn build_comparison(&self) -> anyhow::Result<ComparisonService> {
        let language_model = LanguageModel::load(&self.language_model)
            .with_context(|| format!("Failed to load language model '{}'", self.language_model))?;
        debug!("Loaded language model {}", language_model.name);

        let bpe = BpeTokenizer::cl100k_base().context("Failed to load tiktoken encoding")?;

        let bert_source = self.bert_source();
        info!("BERT model: {}", bert_source.describe());

        Ok(ComparisonService::standard(
            language_model,
            BertTokenizer::new(bert_source),
            bpe,
        ))
    }
}
