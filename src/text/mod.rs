//! Shared linguistic resources for the segmentation pipeline.
//!
//! The sentence splitter and stopword list are built once and passed by
//! reference into each pipeline call, so the core stays free of hidden
//! process-wide state.

use regex::Regex;
use std::collections::HashSet;

/// Common English stopwords excluded from lexical-cohesion comparison.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "but", "by", "can", "could", "did", "do",
    "does", "for", "from", "get", "go", "going", "got", "had", "has", "have",
    "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "just", "know", "like", "me", "more", "my", "no", "not",
    "now", "of", "on", "one", "or", "our", "out", "over", "she", "so",
    "some", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "up", "us", "was", "we", "were", "what", "when",
    "where", "which", "who", "will", "with", "would", "you", "your",
];

/// Regex-based sentence splitter.
///
/// Matches runs of text up to and including terminal punctuation, so a
/// trailing fragment without punctuation is still returned as a sentence.
pub struct SentenceSplitter {
    sentence: Regex,
}

impl SentenceSplitter {
    pub fn new() -> Self {
        let sentence = Regex::new(r"[^.!?]+[.!?]*").expect("Invalid sentence regex");
        Self { sentence }
    }

    /// Split text into trimmed, non-empty sentences.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable stopword list.
pub struct Stopwords {
    words: HashSet<&'static str>,
}

impl Stopwords {
    /// The built-in English stopword list.
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOPWORDS.iter().copied().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

/// Bundled linguistic resources injected into each pipeline call.
pub struct TextResources {
    pub splitter: SentenceSplitter,
    pub stopwords: Stopwords,
}

impl TextResources {
    pub fn new() -> Self {
        Self {
            splitter: SentenceSplitter::new(),
            stopwords: Stopwords::english(),
        }
    }
}

impl Default for TextResources {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase a word and strip non-alphanumeric characters.
///
/// Returns `None` when nothing alphanumeric remains (pure punctuation).
pub fn normalize_word(word: &str) -> Option<String> {
    let normalized: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Tokenize text into normalized comparison tokens.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize_word).collect()
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
