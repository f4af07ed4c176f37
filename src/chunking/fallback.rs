//! Size-bounded fallback segmentation.
//!
//! Used when topic detection finds no boundaries or the topic-based split
//! violates the word-count bounds. Sentences are grouped into fixed runs and
//! repaired in a single left-to-right pass until every chunk fits
//! `[min_words, max_words]`.

use crate::text::word_count;
use std::collections::VecDeque;
use tracing::debug;

/// Groups sentences into size-bounded chunks.
pub struct FallbackSegmenter {
    target_sentences: usize,
    min_words: usize,
    max_words: usize,
}

impl FallbackSegmenter {
    pub fn new(target_sentences: usize, min_words: usize, max_words: usize) -> Self {
        Self {
            target_sentences,
            min_words,
            max_words,
        }
    }

    /// Segment sentences into chunks within the word bounds.
    ///
    /// A document shorter than `min_words` overall comes back as a single
    /// chunk holding everything.
    pub fn segment(&self, sentences: &[&str]) -> Vec<String> {
        if sentences.is_empty() {
            return Vec::new();
        }

        let mut queue: VecDeque<Vec<String>> = sentences
            .chunks(self.target_sentences.max(1))
            .map(|run| run.iter().map(|s| s.to_string()).collect())
            .collect();

        let mut chunks: Vec<Vec<String>> = Vec::new();

        while let Some(group) = queue.pop_front() {
            let words = group_words(&group);

            if words > self.max_words {
                let (left, right) = split_at_midpoint(group);
                queue.push_front(right);
                queue.push_front(left);
                continue;
            }

            if words < self.min_words {
                if let Some(mut next) = queue.pop_front() {
                    // Merge a short chunk into the following one.
                    let mut merged = group;
                    merged.append(&mut next);
                    queue.push_front(merged);
                } else if let Some(last) = chunks.last() {
                    // Last chunk: merge backwards unless that overflows.
                    if group_words(last) + words <= self.max_words {
                        let mut merged = chunks.pop().unwrap_or_default();
                        merged.extend(group);
                        chunks.push(merged);
                    } else {
                        debug!(words, "Keeping short trailing chunk to preserve max bound");
                        chunks.push(group);
                    }
                } else {
                    // Whole document shorter than min_words.
                    chunks.push(group);
                }
                continue;
            }

            chunks.push(group);
        }

        chunks.iter().map(|group| group.join(" ")).collect()
    }
}

fn group_words(group: &[String]) -> usize {
    group.iter().map(|s| word_count(s)).sum()
}

/// Split a sentence group at the sentence boundary nearest the word
/// midpoint. A single over-long sentence splits at its word midpoint.
fn split_at_midpoint(group: Vec<String>) -> (Vec<String>, Vec<String>) {
    if group.len() < 2 {
        let sentence = group.into_iter().next().unwrap_or_default();
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mid = words.len() / 2;
        return (
            vec![words[..mid].join(" ")],
            vec![words[mid..].join(" ")],
        );
    }

    let total = group_words(&group);
    let half = total as f64 / 2.0;

    let mut best_index = 1;
    let mut best_distance = f64::MAX;
    let mut running = 0usize;

    for (i, sentence) in group.iter().enumerate().take(group.len() - 1) {
        running += word_count(sentence);
        let distance = (running as f64 - half).abs();
        if distance < best_distance {
            best_distance = distance;
            best_index = i + 1;
        }
    }

    let mut left = group;
    let right = left.split_off(best_index);
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: usize, topic: &str) -> String {
        let mut body = vec![topic.to_string()];
        for i in 1..words {
            body.push(format!("{}{}", topic, i));
        }
        format!("{}.", body.join(" "))
    }

    #[test]
    fn test_chunks_respect_bounds() {
        let sentences: Vec<String> = (0..30).map(|_| sentence(20, "word")).collect();
        let refs: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();

        let segmenter = FallbackSegmenter::new(5, 50, 150);
        let chunks = segmenter.segment(&refs);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            let words = word_count(chunk);
            assert!(words >= 50 && words <= 150, "chunk had {} words", words);
        }
    }

    #[test]
    fn test_short_document_single_chunk() {
        let text = sentence(40, "tiny");
        let refs = vec![text.as_str()];

        let segmenter = FallbackSegmenter::new(15, 100, 300);
        let chunks = segmenter.segment(&refs);

        assert_eq!(chunks.len(), 1);
        assert_eq!(word_count(&chunks[0]), 40);
    }

    #[test]
    fn test_merges_short_groups_forward() {
        // Groups of 2 sentences hold 20 words, under min; they must merge.
        let sentences: Vec<String> = (0..12).map(|_| sentence(10, "talk")).collect();
        let refs: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();

        let segmenter = FallbackSegmenter::new(2, 30, 100);
        let chunks = segmenter.segment(&refs);

        for chunk in &chunks {
            let words = word_count(chunk);
            assert!(words >= 30 && words <= 100, "chunk had {} words", words);
        }
        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn test_splits_oversized_group() {
        // One run of 10 sentences x 40 words = 400 words, over max.
        let sentences: Vec<String> = (0..10).map(|_| sentence(40, "long")).collect();
        let refs: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();

        let segmenter = FallbackSegmenter::new(10, 100, 300);
        let chunks = segmenter.segment(&refs);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            let words = word_count(chunk);
            assert!(words >= 100 && words <= 300, "chunk had {} words", words);
        }
    }

    #[test]
    fn test_single_giant_sentence_splits_on_words() {
        let text = sentence(700, "mono");
        let refs = vec![text.as_str()];

        let segmenter = FallbackSegmenter::new(15, 100, 300);
        let chunks = segmenter.segment(&refs);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(word_count(chunk) <= 300);
        }
        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        assert_eq!(total, 700);
    }

    #[test]
    fn test_empty_input() {
        let segmenter = FallbackSegmenter::new(15, 100, 300);
        assert!(segmenter.segment(&[]).is_empty());
    }

    #[test]
    fn test_word_conservation() {
        let sentences: Vec<String> = (0..25).map(|i| sentence(8 + (i % 5), "talk")).collect();
        let refs: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();
        let original: usize = refs.iter().map(|s| word_count(s)).sum();

        let segmenter = FallbackSegmenter::new(5, 30, 120);
        let chunks = segmenter.segment(&refs);

        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        assert_eq!(total, original);
    }
}
