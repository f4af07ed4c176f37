//! Chunk assembly from detected boundaries.
//!
//! Converts boundary sentence indices into candidate chunk strings and
//! validates them against the size bounds. Validation is all-or-nothing:
//! mixing topic-based and size-based splitting mid-document would break the
//! size invariant, so a single violation discards the topic split and the
//! whole document goes through the fallback segmenter.

use super::fallback::FallbackSegmenter;
use super::ChunkerConfig;
use crate::text::word_count;
use serde::Serialize;
use tracing::{debug, info};

/// How the final chunk strings were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationOutcome {
    /// The topic-based split passed size validation.
    TopicSplitAccepted { boundaries: usize },
    /// Boundary detection was unusable or produced out-of-bounds chunks.
    FallbackUsed,
}

/// Builds candidate chunks from boundaries, falling back on violations.
pub struct ChunkAssembler<'c> {
    config: &'c ChunkerConfig,
}

impl<'c> ChunkAssembler<'c> {
    pub fn new(config: &'c ChunkerConfig) -> Self {
        Self { config }
    }

    /// Assemble ordered chunk strings from sentences and boundary indices.
    pub fn assemble(
        &self,
        sentences: &[&str],
        boundaries: &[usize],
    ) -> (Vec<String>, SegmentationOutcome) {
        if !boundaries.is_empty() {
            let chunks = materialize(sentences, boundaries);

            if self.within_bounds(&chunks) {
                info!(
                    chunks = chunks.len(),
                    boundaries = boundaries.len(),
                    "Topic-based split accepted"
                );
                return (
                    chunks,
                    SegmentationOutcome::TopicSplitAccepted {
                        boundaries: boundaries.len(),
                    },
                );
            }
            debug!("Topic-based split violated size bounds, using fallback");
        } else {
            debug!("No topic boundaries detected, using fallback");
        }

        let segmenter = FallbackSegmenter::new(
            self.config.target_sentences,
            self.config.min_words,
            self.config.max_words,
        );
        let chunks = segmenter.segment(sentences);
        info!(chunks = chunks.len(), "Fallback segmentation used");
        (chunks, SegmentationOutcome::FallbackUsed)
    }

    fn within_bounds(&self, chunks: &[String]) -> bool {
        chunks.iter().all(|chunk| {
            let words = word_count(chunk);
            words >= self.config.min_words && words <= self.config.max_words
        })
    }
}

/// Split sentences at the boundary indices; each boundary starts a new chunk.
fn materialize(sentences: &[&str], boundaries: &[usize]) -> Vec<String> {
    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;

    for &boundary in boundaries {
        if boundary > start && boundary < sentences.len() {
            chunks.push(sentences[start..boundary].join(" "));
            start = boundary;
        }
    }
    if start < sentences.len() {
        chunks.push(sentences[start..].join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences_of(words: usize, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                let body: Vec<String> = (0..words).map(|i| format!("w{}", i)).collect();
                format!("{}.", body.join(" "))
            })
            .collect()
    }

    #[test]
    fn test_accepts_valid_topic_split() {
        let owned = sentences_of(10, 20);
        let refs: Vec<&str> = owned.iter().map(|s| s.as_str()).collect();
        let config = ChunkerConfig {
            min_words: 50,
            max_words: 150,
            ..ChunkerConfig::default()
        };

        let assembler = ChunkAssembler::new(&config);
        let (chunks, outcome) = assembler.assemble(&refs, &[10]);

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            outcome,
            SegmentationOutcome::TopicSplitAccepted { boundaries: 1 }
        );
        assert_eq!(word_count(&chunks[0]), 100);
        assert_eq!(word_count(&chunks[1]), 100);
    }

    #[test]
    fn test_rejects_out_of_bounds_split() {
        let owned = sentences_of(10, 20);
        let refs: Vec<&str> = owned.iter().map(|s| s.as_str()).collect();
        // Boundary at 2 makes a 20-word first chunk, under min_words.
        let config = ChunkerConfig {
            min_words: 50,
            max_words: 150,
            target_sentences: 10,
            ..ChunkerConfig::default()
        };

        let assembler = ChunkAssembler::new(&config);
        let (chunks, outcome) = assembler.assemble(&refs, &[2]);

        assert_eq!(outcome, SegmentationOutcome::FallbackUsed);
        for chunk in &chunks {
            let words = word_count(chunk);
            assert!(words >= 50 && words <= 150);
        }
    }

    #[test]
    fn test_empty_boundaries_use_fallback() {
        let owned = sentences_of(10, 20);
        let refs: Vec<&str> = owned.iter().map(|s| s.as_str()).collect();
        let config = ChunkerConfig {
            min_words: 50,
            max_words: 150,
            target_sentences: 10,
            ..ChunkerConfig::default()
        };

        let assembler = ChunkAssembler::new(&config);
        let (chunks, outcome) = assembler.assemble(&refs, &[]);

        assert_eq!(outcome, SegmentationOutcome::FallbackUsed);
        assert!(!chunks.is_empty());
    }
}
