//! Treebank-style word tokenizer
//!
//! Text is first split into sentences with punkt-like heuristics for Spanish,
//! then each sentence goes through the Penn Treebank substitution rules:
//! quotes become ``` `` ``` / `''`, punctuation is padded with spaces, and
//! English clitics such as `n't` are split off. Tokens are the
//! whitespace-separated pieces of the rewritten sentence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TokenizerResult;
use crate::tokenizer::TextTokenizer;

pub const NLTK_METHOD: &str = "NLTK";

/// Abbreviations that do not end a sentence (lowercase, without the final period)
const SPANISH_ABBREVIATIONS: &[&str] = &[
    "sr", "sra", "srta", "sres", "dr", "dra", "lic", "ing", "prof", "ud", "uds", "vd", "vds",
    "etc", "pág", "págs", "núm", "art", "cap", "av", "avda", "ej", "p.ej", "aprox", "tel",
    "dpto", "depto", "cía", "fig", "vol", "ee.uu", "a.c", "d.c", "mr", "mrs", "ms", "st", "vs",
];

fn rule(pattern: &str, replacement: &'static str) -> (Regex, &'static str) {
    (
        Regex::new(pattern).expect("treebank rule pattern is valid"),
        replacement,
    )
}

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.?!…]+["'»”’)\]]*\s+"#).expect("sentence boundary pattern is valid")
});

static STARTING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"([«“‘„]|`+)", " ${1} "),
        rule(r#"^""#, "``"),
        rule(r"(``)", " ${1} "),
        rule(r#"([ (\[{<])("|'')"#, "${1} `` "),
    ]
});

static PUNCTUATION: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2} ${3} "),
        rule(r"([:,])([^\d])", " ${1} ${2}"),
        rule(r"([:,])$", " ${1} "),
        rule(r"\.{2,}", " ${0} "),
        rule(r"[;@#$%&]", " ${0} "),
        rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
        rule(r"[?!]", " ${0} "),
        rule(r"([^'])' ", "${1} ' "),
        rule(r"[*]", " ${0} "),
        rule(r"[\]\[(){}<>]", " ${0} "),
        rule(r"--", " -- "),
    ]
});

static ENDING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"([»”’])", " ${1} "),
        rule(r"''", " '' "),
        rule(r#"""#, " '' "),
        rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        rule(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        rule(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        rule(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        rule(r"(?i)\b(wan)(na)\b", " ${1} ${2} "),
        rule(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        rule(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |text, (pattern, replacement)| {
        pattern.replace_all(&text, *replacement).into_owned()
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Separate an apostrophe from a following one-character word ("'a" becomes
/// "' a"). Clitic letters `m t s d n` stay attached.
fn split_opening_apostrophes(text: String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c != '\'' {
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        let word_ends = chars.get(i + 2).map_or(true, |&after| !is_word_char(after));
        let clitic = matches!(next.to_ascii_lowercase(), 'm' | 't' | 's' | 'd' | 'n');
        if is_word_char(next) && word_ends && !clitic {
            out.push(' ');
        }
    }
    out
}

fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '¿' | '¡' | '"' | '«' | '“' | '(' | '\'')
}

/// Whether the period at the end of `before` belongs to an abbreviation or an initial.
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    word.chars().count() == 1 || SPANISH_ABBREVIATIONS.contains(&word.as_str())
}

/// Split text into sentences
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        let Some(next) = text[boundary.end()..].chars().next() else {
            continue;
        };
        if !starts_sentence(next) {
            continue;
        }
        let terminal = boundary
            .as_str()
            .trim_end_matches(|c: char| !matches!(c, '.' | '?' | '!' | '…'));
        let single_period = terminal == ".";
        if single_period && is_abbreviation(&text[start..boundary.start()]) {
            continue;
        }

        let sentence = text[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = boundary.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Tokenize a single sentence with the Treebank rules
pub fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let text = split_opening_apostrophes(apply(&STARTING_QUOTES, sentence.to_string()));
    let text = apply(&PUNCTUATION, text);
    let text = apply(&ENDING_QUOTES, format!(" {text} "));
    let text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}

/// General-purpose word tokenizer: sentence split followed by Treebank rules
#[derive(Debug, Default, Clone, Copy)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl TextTokenizer for TreebankTokenizer {
    fn method(&self) -> &str {
        NLTK_METHOD
    }

    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<String>> {
        Ok(split_sentences(text)
            .into_iter()
            .flat_map(tokenize_sentence)
            .collect())
    }
}
