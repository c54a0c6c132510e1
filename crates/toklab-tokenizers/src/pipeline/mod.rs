//! Linguistic pipeline tokenizer
//!
//! Follows the rule-based scheme used by industrial NLP pipelines: split on
//! single spaces, turn any extra whitespace into its own token, then peel
//! prefixes and suffixes off each chunk and split what is left on infixes.
//! Exceptions short-circuit the process at every step.

mod model;

pub use model::{Infix, InfixContext, LanguageModel, BUNDLED_MODEL};

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TokenizerResult;
use crate::tokenizer::TextTokenizer;

pub const SPACY_METHOD: &str = "spaCy";

static PIECES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+|\S+").expect("piece pattern is valid"));

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://|www\.)\S+$").expect("url pattern is valid")
});

#[derive(Debug, Clone)]
pub struct PipelineTokenizer {
    model: Arc<LanguageModel>,
}

impl PipelineTokenizer {
    pub fn new(model: LanguageModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for piece in PIECES.find_iter(text) {
            let chunk = piece.as_str();
            if chunk.starts_with(char::is_whitespace) {
                // One space after a token is that token's trailing whitespace.
                let extra = if piece.start() > 0 && chunk.starts_with(' ') {
                    &chunk[1..]
                } else {
                    chunk
                };
                if !extra.is_empty() {
                    tokens.push(extra.to_string());
                }
            } else {
                self.split_chunk(chunk, &mut tokens);
            }
        }

        tokens
    }

    fn split_chunk(&self, chunk: &str, tokens: &mut Vec<String>) {
        let model = &self.model;
        let mut prefixes = Vec::new();
        let mut suffixes = Vec::new();
        let mut rest = chunk;

        loop {
            if rest.is_empty() || model.exception(rest).is_some() {
                break;
            }
            let before = rest.len();

            if let Some(len) = model.match_prefix(rest) {
                prefixes.push(&rest[..len]);
                rest = &rest[len..];
                if rest.is_empty() || model.exception(rest).is_some() {
                    break;
                }
            }

            if let Some(len) = model.match_suffix(rest) {
                suffixes.push(&rest[rest.len() - len..]);
                rest = &rest[..rest.len() - len];
            }

            if rest.len() == before {
                break;
            }
        }

        tokens.extend(prefixes.into_iter().map(str::to_string));
        if let Some(exception) = model.exception(rest) {
            tokens.extend(exception.iter().cloned());
        } else if !rest.is_empty() {
            self.split_infixes(rest, tokens);
        }
        tokens.extend(suffixes.into_iter().rev().map(str::to_string));
    }

    fn split_infixes(&self, text: &str, tokens: &mut Vec<String>) {
        if URL.is_match(text) {
            tokens.push(text.to_string());
            return;
        }

        let mut start = 0;
        let mut at = 0;
        while let Some(c) = text[at..].chars().next() {
            match self.model.match_infix(text, at) {
                Some(len) => {
                    if at > start {
                        tokens.push(text[start..at].to_string());
                    }
                    tokens.push(text[at..at + len].to_string());
                    at += len;
                    start = at;
                }
                None => at += c.len_utf8(),
            }
        }

        if start < text.len() {
            tokens.push(text[start..].to_string());
        }
    }
}

impl TextTokenizer for PipelineTokenizer {
    fn method(&self) -> &str {
        SPACY_METHOD
    }

    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>> {
        Ok(self.split(text))
    }
}
