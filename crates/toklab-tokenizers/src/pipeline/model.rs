//! Language model resource for the pipeline tokenizer
//!
//! A model is a JSON rule set: prefixes and suffixes stripped from each
//! whitespace-separated chunk, infixes split inside it, and exceptions that
//! map a whole chunk to a fixed token sequence.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ModelLoadError;

/// Name of the rule set compiled into the crate
pub const BUNDLED_MODEL: &str = "es_core_news_sm";

const BUNDLED_MODEL_JSON: &str = include_str!("../../resources/es_core_news_sm.json");

/// Where an infix may split a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfixContext {
    /// Anywhere except the chunk edges
    Any,
    /// Between two alphabetic characters
    Letters,
    /// Between two digits
    Digits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Infix {
    pub text: String,
    pub context: InfixContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageModel {
    pub name: String,
    pub lang: String,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub infixes: Vec<Infix>,
    #[serde(default)]
    pub exceptions: HashMap<String, Vec<String>>,
}

impl LanguageModel {
    /// Load a model by bundled name, or from a JSON file path
    pub fn load(name_or_path: &str) -> Result<Self, ModelLoadError> {
        if name_or_path == BUNDLED_MODEL {
            return Self::bundled();
        }

        let path = Path::new(name_or_path);
        if path.is_file() {
            return Self::from_path(path);
        }

        Err(ModelLoadError::UnknownModel(name_or_path.to_string()))
    }

    /// The compiled-in `es_core_news_sm` rules
    pub fn bundled() -> Result<Self, ModelLoadError> {
        Self::from_json(BUNDLED_MODEL_JSON)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json(&json)?;
        debug!("Loaded language model {} from {}", model.name, path.display());
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        let mut model: LanguageModel = serde_json::from_str(json)?;
        model.normalize();
        Ok(model)
    }

    /// Drop empty affixes and order the rest longest first, so "..." wins over ".".
    fn normalize(&mut self) {
        self.prefixes.retain(|p| !p.is_empty());
        self.suffixes.retain(|s| !s.is_empty());
        self.infixes.retain(|i| !i.text.is_empty());

        self.prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
        self.suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
        self.infixes.sort_by_key(|i| std::cmp::Reverse(i.text.len()));
    }

    pub fn exception(&self, chunk: &str) -> Option<&[String]> {
        self.exceptions.get(chunk).map(Vec::as_slice)
    }

    /// Byte length of the prefix to strip from `text`
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        self.prefixes
            .iter()
            .find(|prefix| text.starts_with(prefix.as_str()))
            .map(String::len)
    }

    /// Byte length of the suffix to strip from `text`
    pub fn match_suffix(&self, text: &str) -> Option<usize> {
        self.suffixes
            .iter()
            .find(|suffix| text.ends_with(suffix.as_str()) && suffix_allowed(text, suffix))
            .map(String::len)
    }

    /// Byte length of an infix starting at byte offset `at`
    pub fn match_infix(&self, text: &str, at: usize) -> Option<usize> {
        let prev = text[..at].chars().next_back()?;
        self.infixes
            .iter()
            .find(|infix| {
                if !text[at..].starts_with(infix.text.as_str()) {
                    return false;
                }
                let Some(next) = text[at + infix.text.len()..].chars().next() else {
                    return false;
                };
                match infix.context {
                    InfixContext::Any => true,
                    InfixContext::Letters => prev.is_alphabetic() && next.is_alphabetic(),
                    InfixContext::Digits => prev.is_ascii_digit() && next.is_ascii_digit(),
                }
            })
            .map(|infix| infix.text.len())
    }
}

/// A trailing period stays on initials and dotted abbreviations ("J.", "p.ej").
fn suffix_allowed(text: &str, suffix: &str) -> bool {
    if suffix != "." {
        return true;
    }
    let stem = &text[..text.len() - suffix.len()];
    match stem.rsplit_once('.') {
        Some((_, tail)) => tail.chars().count() > 2,
        None => stem.chars().count() > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_model_loads() {
        let model = LanguageModel::bundled().unwrap();
        assert_eq!(model.name, BUNDLED_MODEL);
        assert_eq!(model.lang, "es");
        assert!(model.exception("Sr.").is_some());
    }

    #[test]
    fn test_load_by_name_and_unknown_name() {
        assert!(LanguageModel::load(BUNDLED_MODEL).is_ok());
        let err = LanguageModel::load("xx_missing_model").unwrap_err();
        assert!(matches!(err, ModelLoadError::UnknownModel(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.json");
        std::fs::write(
            &path,
            r#"{ "name": "tiny", "lang": "xx", "suffixes": ["!"], "prefixes": [""] }"#,
        )
        .unwrap();

        let model = LanguageModel::load(path.to_str().unwrap()).unwrap();
        assert_eq!(model.name, "tiny");
        assert!(model.prefixes.is_empty());
        assert_eq!(model.match_suffix("hey!"), Some(1));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = LanguageModel::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }

    #[test]
    fn test_longest_affix_wins() {
        let model = LanguageModel::bundled().unwrap();
        assert_eq!(model.match_suffix("pues..."), Some(3));
        assert_eq!(model.match_prefix("...y"), Some(3));
    }

    #[test]
    fn test_period_suffix_guard() {
        let model = LanguageModel::bundled().unwrap();
        assert_eq!(model.match_suffix("casa."), Some(1));
        assert_eq!(model.match_suffix("J."), None);
        assert_eq!(model.match_suffix("p.ej."), None);
    }

    #[test]
    fn test_infix_context() {
        let model = LanguageModel::bundled().unwrap();
        assert_eq!(model.match_infix("franco-alemán", 6), Some(1));
        assert_eq!(model.match_infix("1-2", 1), None);
        assert_eq!(model.match_infix("2+2", 1), Some(1));
        assert_eq!(model.match_infix("-a", 0), None);
    }
}
