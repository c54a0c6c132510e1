//! Byte-pair-encoding tokenizer backed by tiktoken encodings

use tiktoken_rs::CoreBPE;

use crate::error::{ModelLoadError, TokenizerError, TokenizerResult};
use crate::tokenizer::TextTokenizer;

pub const TIKTOKEN_METHOD: &str = "tiktoken";

pub const CL100K_BASE: &str = "cl100k_base";

/// Special tokens of `cl100k_base`. Plain text containing them is refused.
pub const CL100K_SPECIAL_TOKENS: &[&str] = &[
    "<|endoftext|>",
    "<|fim_prefix|>",
    "<|fim_middle|>",
    "<|fim_suffix|>",
    "<|endofprompt|>",
];

pub struct BpeTokenizer {
    encoding: &'static str,
    special_tokens: &'static [&'static str],
    bpe: CoreBPE,
}

impl BpeTokenizer {
    pub fn cl100k_base() -> Result<Self, ModelLoadError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| ModelLoadError::Encoding {
            name: CL100K_BASE.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            encoding: CL100K_BASE,
            special_tokens: CL100K_SPECIAL_TOKENS,
            bpe,
        })
    }

    pub fn encoding(&self) -> &str {
        self.encoding
    }

    /// Reject the special token that occurs first in `text`
    fn check_special_tokens(&self, text: &str) -> TokenizerResult<()> {
        let first = self
            .special_tokens
            .iter()
            .filter_map(|token| text.find(token).map(|at| (at, *token)))
            .min_by_key(|(at, _)| *at);

        match first {
            Some((_, token)) => Err(TokenizerError::DisallowedSpecialToken(token.to_string())),
            None => Ok(()),
        }
    }
}

impl TextTokenizer for BpeTokenizer {
    fn method(&self) -> &str {
        TIKTOKEN_METHOD
    }

    /// Encodes, then decodes every unit on its own.
    ///
    /// A unit holding part of a multi-byte character is not valid UTF-8 by
    /// itself; its invalid bytes decode to U+FFFD and the valid ones are kept.
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>> {
        self.check_special_tokens(text)?;

        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|unit| String::from_utf8_lossy(&self.bpe._decode_native(&[unit])).into_owned())
            .collect())
    }
}
