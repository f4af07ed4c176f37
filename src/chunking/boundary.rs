//! Lexical topic-boundary detection.
//!
//! A TextTiling-style detector: the token stream is grouped into fixed-size
//! pseudo-sentence blocks, adjacent blocks are scored for lexical cohesion,
//! and deep dips in the smoothed similarity curve are reported as topic
//! boundaries. Short documents produce no boundaries; the assembler then
//! routes to the fallback segmenter.

use super::{ChunkerConfig, SimilarityMeasure};
use crate::text::{normalize_tokens, Stopwords};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A normalized token tagged with the sentence it came from.
struct Token {
    text: String,
    sentence: usize,
    is_stopword: bool,
}

/// Detects topic-shift boundaries from lexical cohesion.
pub struct TopicBoundaryDetector<'a> {
    window_size: usize,
    smoothing_depth: usize,
    depth_cutoff: f64,
    similarity: SimilarityMeasure,
    stopwords: &'a Stopwords,
}

impl<'a> TopicBoundaryDetector<'a> {
    pub fn new(config: &ChunkerConfig, stopwords: &'a Stopwords) -> Self {
        Self {
            window_size: config.window_size,
            smoothing_depth: config.smoothing_depth,
            depth_cutoff: config.depth_cutoff,
            similarity: config.similarity,
            stopwords,
        }
    }

    /// Detect boundary positions as sentence indices (each marks the start
    /// of a new topic block). Returns an empty list when the document is too
    /// short for block comparison; never errors.
    pub fn detect(&self, sentences: &[&str]) -> Vec<usize> {
        let tokens = self.tokenize(sentences);

        // Full blocks only; a trailing partial block would skew similarity.
        let block_count = tokens.len() / self.window_size;
        if block_count < 2 {
            debug!(
                tokens = tokens.len(),
                window_size = self.window_size,
                "Document too short for topic detection"
            );
            return Vec::new();
        }

        let similarities = self.gap_similarities(&tokens, block_count);
        let smoothed = smooth(&similarities, self.smoothing_depth);
        let depths = depth_scores(&smoothed);

        let boundary_gaps = self.select_gaps(&smoothed, &depths);
        self.gaps_to_sentence_indices(&tokens, &boundary_gaps, sentences.len())
    }

    fn tokenize(&self, sentences: &[&str]) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (sentence, text) in sentences.iter().enumerate() {
            for word in normalize_tokens(text) {
                let is_stopword = self.stopwords.contains(&word);
                tokens.push(Token {
                    text: word,
                    sentence,
                    is_stopword,
                });
            }
        }
        tokens
    }

    /// Similarity between each adjacent pseudo-sentence block pair.
    fn gap_similarities(&self, tokens: &[Token], block_count: usize) -> Vec<f64> {
        let blocks: Vec<&[Token]> = (0..block_count)
            .map(|b| &tokens[b * self.window_size..(b + 1) * self.window_size])
            .collect();

        blocks
            .windows(2)
            .map(|pair| match self.similarity {
                SimilarityMeasure::Overlap => self.overlap_similarity(pair[0], pair[1]),
                SimilarityMeasure::Cosine => cosine_similarity(pair[0], pair[1]),
            })
            .collect()
    }

    /// Token-set intersection normalized by block length, stopwords excluded.
    fn overlap_similarity(&self, a: &[Token], b: &[Token]) -> f64 {
        let set_a: HashSet<&str> = content_words(a).collect();
        let set_b: HashSet<&str> = content_words(b).collect();

        let shared = set_a.intersection(&set_b).count();
        shared as f64 / self.window_size as f64
    }

    /// Gaps that sit in a genuine dip and clear the depth threshold.
    fn select_gaps(&self, smoothed: &[f64], depths: &[f64]) -> Vec<usize> {
        let threshold = depth_threshold(depths, self.depth_cutoff);
        debug!(threshold, gaps = depths.len(), "Scoring candidate gaps");

        (0..depths.len())
            .filter(|&i| is_local_minimum(smoothed, i))
            .filter(|&i| depths[i] > 0.0 && depths[i] > threshold)
            .collect()
    }

    /// Map gap positions back to sentence indices, snapping a mid-sentence
    /// gap forward to the next sentence start.
    fn gaps_to_sentence_indices(
        &self,
        tokens: &[Token],
        gaps: &[usize],
        sentence_count: usize,
    ) -> Vec<usize> {
        let mut boundaries: Vec<usize> = gaps
            .iter()
            .map(|&gap| {
                let offset = (gap + 1) * self.window_size;
                let current = tokens[offset].sentence;
                if tokens[offset - 1].sentence < current {
                    current
                } else {
                    current + 1
                }
            })
            .filter(|&idx| idx > 0 && idx < sentence_count)
            .collect();

        boundaries.dedup();
        boundaries
    }
}

fn content_words<'t>(block: &'t [Token]) -> impl Iterator<Item = &'t str> {
    block
        .iter()
        .filter(|t| !t.is_stopword)
        .map(|t| t.text.as_str())
}

/// Cosine similarity over term-frequency vectors, stopwords excluded.
fn cosine_similarity(a: &[Token], b: &[Token]) -> f64 {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);

    let dot: f64 = counts_a
        .iter()
        .filter_map(|(term, &count)| counts_b.get(term).map(|&other| count * other))
        .sum();

    let norm_a: f64 = counts_a.values().map(|c| c * c).sum::<f64>().sqrt();
    let norm_b: f64 = counts_b.values().map(|c| c * c).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn term_counts<'t>(block: &'t [Token]) -> HashMap<&'t str, f64> {
    let mut counts = HashMap::new();
    for word in content_words(block) {
        *counts.entry(word).or_insert(0.0) += 1.0;
    }
    counts
}

/// Smooth the similarity curve with `depth` passes of a centered
/// three-point moving average. Edge positions average their available
/// neighbors, which never introduces new minima.
fn smooth(values: &[f64], depth: usize) -> Vec<f64> {
    let mut current = values.to_vec();
    if current.len() < 3 {
        return current;
    }

    for _ in 0..depth {
        let mut next = current.clone();
        for i in 0..current.len() {
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(current.len() - 1);
            let window = &current[lo..=hi];
            next[i] = window.iter().sum::<f64>() / window.len() as f64;
        }
        current = next;
    }
    current
}

/// Depth score per gap: how far the similarity dips below the nearest local
/// maxima on either side.
fn depth_scores(smoothed: &[f64]) -> Vec<f64> {
    (0..smoothed.len())
        .map(|i| {
            let mut left = i;
            while left > 0 && smoothed[left - 1] >= smoothed[left] {
                left -= 1;
            }
            let mut right = i;
            while right + 1 < smoothed.len() && smoothed[right + 1] >= smoothed[right] {
                right += 1;
            }
            (smoothed[left] - smoothed[i]) + (smoothed[right] - smoothed[i])
        })
        .collect()
}

fn is_local_minimum(smoothed: &[f64], i: usize) -> bool {
    let left_ok = i == 0 || smoothed[i] <= smoothed[i - 1];
    let right_ok = i + 1 == smoothed.len() || smoothed[i] <= smoothed[i + 1];
    left_ok && right_ok
}

/// Threshold policy: `mean(depths) - cutoff * stddev(depths)`.
fn depth_threshold(depths: &[f64], cutoff: f64) -> f64 {
    if depths.is_empty() {
        return 0.0;
    }

    let mean = depths.iter().sum::<f64>() / depths.len() as f64;
    let variance = depths.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / depths.len() as f64;
    mean - cutoff * variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{SentenceSplitter, Stopwords};

    fn detect(text: &str, config: &ChunkerConfig) -> Vec<usize> {
        let splitter = SentenceSplitter::new();
        let stopwords = Stopwords::english();
        let sentences = splitter.split(text);
        TopicBoundaryDetector::new(config, &stopwords).detect(&sentences)
    }

    fn two_topic_text() -> String {
        let first = "Python syntax compiles tokens parser grammar. ".repeat(10);
        let second = "Cooking pasta sauce tomato basil oven. ".repeat(10);
        format!("{}{}", first, second)
    }

    #[test]
    fn test_short_document_yields_no_boundaries() {
        let config = ChunkerConfig::default();
        let boundaries = detect("Too short. Really short. Nothing here.", &config);
        assert!(boundaries.is_empty());
    }

    #[test]
    fn test_uniform_document_yields_no_boundaries() {
        let config = ChunkerConfig {
            window_size: 6,
            smoothing_depth: 2,
            ..ChunkerConfig::default()
        };
        let text = "Python syntax compiles tokens parser grammar. ".repeat(20);
        assert!(detect(&text, &config).is_empty());
    }

    #[test]
    fn test_detects_vocabulary_shift() {
        let config = ChunkerConfig {
            window_size: 6,
            smoothing_depth: 2,
            ..ChunkerConfig::default()
        };
        let boundaries = detect(&two_topic_text(), &config);
        assert_eq!(boundaries, vec![10]);
    }

    #[test]
    fn test_cosine_measure_detects_same_shift() {
        let config = ChunkerConfig {
            window_size: 6,
            smoothing_depth: 2,
            similarity: SimilarityMeasure::Cosine,
            ..ChunkerConfig::default()
        };
        let boundaries = detect(&two_topic_text(), &config);
        assert_eq!(boundaries, vec![10]);
    }

    #[test]
    fn test_boundaries_are_sorted_and_in_range() {
        let config = ChunkerConfig {
            window_size: 5,
            smoothing_depth: 1,
            ..ChunkerConfig::default()
        };
        let text = format!(
            "{}{}{}",
            "Markets trading stocks bonds yields brokers. ".repeat(8),
            "Gardens flowers soil seeds watering pruning. ".repeat(8),
            "Engines pistons torque cylinders exhaust valves. ".repeat(8),
        );
        let boundaries = detect(&text, &config);

        assert!(!boundaries.is_empty());
        let mut sorted = boundaries.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(boundaries, sorted);
        assert!(boundaries.iter().all(|&b| b > 0 && b < 24));
    }
}
