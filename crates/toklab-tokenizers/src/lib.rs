//! # Toklab Tokenizers
//!
//! The five tokenization methods compared by the service, behind a single
//! [`TextTokenizer`] trait, plus the timing helper and the orchestrator that
//! runs them in a fixed order.
//!
//! | Method     | Implementation |
//! |------------|----------------|
//! | `Regex`    | [`RegexTokenizer`] word runs and single symbols |
//! | `NLTK`     | [`TreebankTokenizer`] sentence split + Treebank rules |
//! | `spaCy`    | [`PipelineTokenizer`] prefix/suffix/infix rules from a [`LanguageModel`] |
//! | `BERT`     | [`BertTokenizer`] WordPiece via `tokenizers` |
//! | `tiktoken` | [`BpeTokenizer`] `cl100k_base` via `tiktoken-rs` |
//!
//! ## Example
//!
//! ```rust
//! use toklab_tokenizers::{RegexTokenizer, TextTokenizer};
//!
//! let tokens = RegexTokenizer::new().tokenize("Hola, mundo!").unwrap();
//! assert_eq!(tokens, vec!["Hola", ",", "mundo", "!"]);
//! ```

pub mod bpe;
pub mod comparison;
pub mod error;
pub mod pattern;
pub mod pipeline;
pub mod timing;
pub mod tokenizer;
pub mod treebank;
pub mod wordpiece;

pub use bpe::BpeTokenizer;
pub use comparison::{ComparisonError, ComparisonService, TokenizationResult};
pub use error::{ModelLoadError, TokenizerError, TokenizerResult};
pub use pattern::RegexTokenizer;
pub use pipeline::{LanguageModel, PipelineTokenizer};
pub use timing::measure;
pub use tokenizer::TextTokenizer;
pub use treebank::TreebankTokenizer;
pub use wordpiece::{BertTokenizer, ModelSource};
