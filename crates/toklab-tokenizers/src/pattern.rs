//! Regex word/punctuation splitter

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TokenizerResult;
use crate::tokenizer::TextTokenizer;

pub const REGEX_METHOD: &str = "Regex";

/// A maximal run of letters, digits or underscores, or one character that is
/// none of those and not whitespace. Marks and connector punctuation are symbols.
pub const WORD_OR_SYMBOL_PATTERN: &str = r"[\p{L}\p{N}_]+|[^\p{L}\p{N}_\s]";

static WORD_OR_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(WORD_OR_SYMBOL_PATTERN).expect("word/symbol pattern is valid"));

/// Pattern-based tokenizer. Whitespace is never emitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexTokenizer;

impl RegexTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Borrowed tokens with their byte offsets in `text`.
    pub fn spans<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        WORD_OR_SYMBOL
            .find_iter(text)
            .map(|m| (m.start(), m.as_str()))
            .collect()
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        WORD_OR_SYMBOL
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl TextTokenizer for RegexTokenizer {
    fn method(&self) -> &str {
        REGEX_METHOD
    }

    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>> {
        Ok(self.split(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_punctuation() {
        let tokens = RegexTokenizer::new().split("Hola, mundo!");
        assert_eq!(tokens, vec!["Hola", ",", "mundo", "!"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let tokenizer = RegexTokenizer::new();
        assert!(tokenizer.split("").is_empty());
        assert!(tokenizer.split(" \t\n  ").is_empty());
    }

    #[test]
    fn test_leading_and_trailing_whitespace_ignored() {
        let tokens = RegexTokenizer::new().split("   ¿Qué tal?   ");
        assert_eq!(tokens, vec!["¿", "Qué", "tal", "?"]);
    }

    #[test]
    fn test_unicode_word_runs() {
        let tokens = RegexTokenizer::new().split("niño_3 añadió 42€...");
        assert_eq!(tokens, vec!["niño_3", "añadió", "42", "€", ".", ".", "."]);
    }

    #[test]
    fn test_word_class_is_letters_digits_underscore() {
        let tokens = RegexTokenizer::new().split("x² cafe\u{301} a‿b ½");
        assert_eq!(tokens, vec!["x²", "cafe", "\u{301}", "a", "‿", "b", "½"]);
    }

    #[test]
    fn test_contraction_splits_on_apostrophe() {
        let tokens = RegexTokenizer::new().split("I can't betray");
        assert_eq!(tokens, vec!["I", "can", "'", "t", "betray"]);
    }

    #[test]
    fn test_no_whitespace_tokens_and_gaps_are_whitespace() {
        let samples = [
            "The couch has accepted me as one of its own, and I can't betray its trust.",
            "  a\tb\n\nc  ",
            "x=y+z; (¡sí!)",
            "",
        ];
        let tokenizer = RegexTokenizer::new();

        for text in samples {
            let mut rebuilt = String::new();
            let mut last_end = 0;
            for (start, token) in tokenizer.spans(text) {
                assert!(!token.trim().is_empty(), "whitespace token in {text:?}");
                let gap = &text[last_end..start];
                assert!(gap.chars().all(char::is_whitespace), "non-blank gap {gap:?}");
                rebuilt.push_str(gap);
                rebuilt.push_str(token);
                last_end = start + token.len();
            }
            rebuilt.push_str(&text[last_end..]);
            assert_eq!(rebuilt, text);
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let tokenizer = RegexTokenizer::new();
        let text = "Uno, dos; tres.";
        assert_eq!(tokenizer.split(text), tokenizer.split(text));
    }
}
