//! Tokenizer contract and the default tokenizer.
//!
//! The tokenizer itself is deliberately out of scope as a pluggable
//! collaborator: the engine consumes whatever token producer the caller
//! supplies. This module defines that contract plus the one concrete
//! default implementation spec.md names, so the crate is usable without a
//! caller writing their own from scratch.
//!
//! Token-length partitioning (length 1 → char, length ≥ 2 → word, length 0
//! discarded) is owned by the engine, not the tokenizer — see
//! `partition_tokens` below.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Produces tokens for indexing from a document's text (plus any extra
/// fields the caller's document type carries, which a custom tokenizer may
/// inspect — this crate only requires access to `text`).
pub trait IndexingTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Produces tokens for a search query. Defaults to the indexing tokenizer
/// when the caller doesn't supply a separate one.
pub trait SearchTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F: Fn(&str) -> Vec<String> + Send + Sync> IndexingTokenizer for F {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

impl<F: Fn(&str) -> Vec<String> + Send + Sync> SearchTokenizer for F {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Unicode word segmentation + lower-casing, falling back to a regex split
/// on any run of non-alphanumeric, non-CJK-ideograph characters. This is
/// the one tokenizer this crate ships; anything more elaborate is a caller
/// concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

fn fallback_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^\p{Alphabetic}\p{Number}\p{Han}\p{Hiragana}\p{Katakana}]+").unwrap()
    })
}

impl DefaultTokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in text.unicode_words() {
            let lower = word.to_lowercase();
            // `unicode_words` already strips most punctuation, but a word
            // boundary can still straddle scripts the regex fallback
            // handles better (e.g. mixed CJK/Latin runs); re-split through
            // the fallback regex to be safe, then discard empties.
            for piece in fallback_split_re().split(&lower) {
                if !piece.is_empty() {
                    tokens.push(piece.to_string());
                }
            }
        }
        tokens
    }
}

impl IndexingTokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        DefaultTokenizer::tokenize(self, text)
    }
}

impl SearchTokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        DefaultTokenizer::tokenize(self, text)
    }
}

/// Tokens bucketed by the engine's length rule: length 1 → char, length
/// ≥ 2 → word. Length-0 tokens are silently discarded. Per-document
/// dedup within each bucket happens here, preserving first-seen order.
pub struct PartitionedTokens {
    pub words: Vec<String>,
    pub chars: Vec<String>,
}

pub fn partition_tokens(tokens: Vec<String>) -> PartitionedTokens {
    let mut words = Vec::new();
    let mut chars = Vec::new();
    let mut seen_words = std::collections::HashSet::new();
    let mut seen_chars = std::collections::HashSet::new();

    for token in tokens {
        let len = token.chars().count();
        match len {
            0 => continue,
            1 => {
                if seen_chars.insert(token.clone()) {
                    chars.push(token);
                }
            }
            _ => {
                if seen_words.insert(token.clone()) {
                    words.push(token);
                }
            }
        }
    }

    PartitionedTokens { words, chars }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        let tokens = DefaultTokenizer.tokenize("Hello World");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn splits_cjk_into_individual_ideographs_via_fallback() {
        // unicode_words groups CJK runs into one "word"; the fallback
        // regex does NOT split within a Han run (Han is in the allowed
        // class), so a CJK sentence tokenizes as a single run here. A
        // char-level CJK tokenizer is a caller-supplied alternative
        // (see S6 in the end-to-end scenarios), not this default.
        let tokens = DefaultTokenizer.tokenize("可是");
        assert_eq!(tokens, vec!["可是"]);
    }

    #[test]
    fn discards_punctuation_only_input() {
        let tokens = DefaultTokenizer.tokenize("... !!! ???");
        assert!(tokens.is_empty());
    }

    #[test]
    fn partition_splits_by_code_point_length() {
        let partitioned =
            partition_tokens(vec!["ab".to_string(), "c".to_string(), "".to_string()]);
        assert_eq!(partitioned.words, vec!["ab"]);
        assert_eq!(partitioned.chars, vec!["c"]);
    }

    #[test]
    fn partition_dedupes_within_each_bucket() {
        let partitioned = partition_tokens(vec![
            "ab".to_string(),
            "ab".to_string(),
            "c".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(partitioned.words, vec!["ab"]);
        assert_eq!(partitioned.chars, vec!["c"]);
    }

    #[test]
    fn partition_uses_code_point_not_byte_length() {
        // "é" as a single precomposed scalar is 2 UTF-8 bytes but 1 code
        // point, so it belongs in the char bucket.
        let partitioned = partition_tokens(vec!["é".to_string()]);
        assert_eq!(partitioned.chars, vec!["é"]);
        assert!(partitioned.words.is_empty());
    }
}
