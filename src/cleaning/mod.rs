//! Transcript cleanup for raw spoken-word text.
//!
//! Auto-generated captions carry filler sounds, stutters, and broken
//! punctuation that hurt downstream segmentation. The cleaner normalizes a
//! raw transcript into the cleaned form the chunking pipeline expects.

use regex::Regex;
use std::collections::HashSet;

/// Filler words and sounds removed from transcripts.
const FILLER_WORDS: &[&str] = &[
    "uh", "um", "uhm", "hmm", "hm", "ah", "eh", "er", "like", "basically",
    "actually", "literally", "right", "okay", "ok", "yeah", "yep", "nah",
    "mhm", "uh-huh", "mm-hmm",
];

/// Cleans and normalizes raw transcript text.
///
/// All passes are pure text transformations; regexes are compiled once at
/// construction.
pub struct TranscriptCleaner {
    filler: HashSet<&'static str>,
    whitespace: Regex,
    space_before_punct: Regex,
    missing_space_after: Regex,
    sentence_start: Regex,
}

impl TranscriptCleaner {
    pub fn new() -> Self {
        Self {
            filler: FILLER_WORDS.iter().copied().collect(),
            whitespace: Regex::new(r"\s+").expect("Invalid whitespace regex"),
            space_before_punct: Regex::new(r"\s+([.,!?;:])").expect("Invalid punctuation regex"),
            missing_space_after: Regex::new(r"([.,!?;:])(\S)").expect("Invalid spacing regex"),
            sentence_start: Regex::new(r"([.!?]\s+)([a-z])").expect("Invalid capitalization regex"),
        }
    }

    /// Run the full cleanup: whitespace, fillers, stutters, sentence repair.
    pub fn clean(&self, text: &str) -> String {
        let text = self.collapse_whitespace(text);
        let text = self.remove_filler_words(&text);
        let text = self.remove_repeated_words(&text);
        self.fix_sentences(&text)
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }

    /// Drop words whose punctuation-stripped lowercase form is a filler.
    fn remove_filler_words(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| {
                let stripped = word
                    .trim_matches(|c: char| ".,!?;:".contains(c))
                    .to_lowercase();
                !self.filler.contains(stripped.as_str())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Collapse consecutive repeats ("the the the cat" becomes "the cat").
    fn remove_repeated_words(&self, text: &str) -> String {
        let mut kept: Vec<&str> = Vec::new();

        for word in text.split_whitespace() {
            let current = word
                .trim_matches(|c: char| ".,!?;:".contains(c))
                .to_lowercase();
            let previous = kept.last().map(|w| {
                w.trim_matches(|c: char| ".,!?;:".contains(c)).to_lowercase()
            });

            if previous.as_deref() == Some(current.as_str()) && !current.is_empty() {
                continue;
            }
            kept.push(word);
        }

        kept.join(" ")
    }

    /// Repair punctuation spacing and sentence capitalization.
    fn fix_sentences(&self, text: &str) -> String {
        let text = text.replace('\n', " ").replace('\r', " ");
        let text = self.space_before_punct.replace_all(&text, "$1");
        let text = self.missing_space_after.replace_all(&text, "$1 $2");

        let text = self.sentence_start.replace_all(&text, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        });

        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl Default for TranscriptCleaner {
    fn default() -> Self {
        Self::new()
    }
}
