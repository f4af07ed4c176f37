//! Sliding-window overlap construction.
//!
//! Each emitted chunk after the first is prefixed with a fixed-size word
//! tail of the previous chunk, preserving context across chunk boundaries
//! for retrieval. The prefix is purely additive; no content is removed or
//! truncated anywhere.

/// Prefixes each chunk with the tail of its predecessor.
pub struct OverlapWindower {
    overlap_words: usize,
}

impl OverlapWindower {
    pub fn new(overlap_words: usize) -> Self {
        Self { overlap_words }
    }

    /// Expand pre-overlap chunks into `(text, has_overlap)` pairs.
    ///
    /// Chunk 0 passes through unchanged. The overlap donor is always the
    /// *pre-overlap* predecessor; a donor shorter than `overlap_words`
    /// contributes all of its words.
    pub fn apply(&self, chunks: &[String]) -> Vec<(String, bool)> {
        chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                if i == 0 || self.overlap_words == 0 {
                    return (chunk.clone(), false);
                }

                let tail = last_words(&chunks[i - 1], self.overlap_words);
                (format!("{} {}", tail, chunk), true)
            })
            .collect()
    }
}

/// The last `n` words of a text, space-joined.
pub fn last_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let start = words.len().saturating_sub(n);
    words[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::word_count;

    fn numbered_chunk(prefix: &str, words: usize) -> String {
        (0..words)
            .map(|i| format!("{}{}", prefix, i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_first_chunk_unchanged() {
        let chunks = vec![numbered_chunk("a", 30), numbered_chunk("b", 30)];
        let windower = OverlapWindower::new(10);
        let emitted = windower.apply(&chunks);

        assert_eq!(emitted[0].0, chunks[0]);
        assert!(!emitted[0].1);
        assert!(emitted[1].1);
    }

    #[test]
    fn test_overlap_prefix_matches_previous_tail() {
        let chunks = vec![numbered_chunk("a", 30), numbered_chunk("b", 30)];
        let windower = OverlapWindower::new(10);
        let emitted = windower.apply(&chunks);

        let prefix: Vec<&str> = emitted[1].0.split_whitespace().take(10).collect();
        let tail: Vec<&str> = chunks[0]
            .split_whitespace()
            .skip(20)
            .collect();
        assert_eq!(prefix, tail);
        assert_eq!(word_count(&emitted[1].0), 40);
    }

    #[test]
    fn test_short_donor_contributes_everything() {
        let chunks = vec![numbered_chunk("a", 5), numbered_chunk("b", 30)];
        let windower = OverlapWindower::new(10);
        let emitted = windower.apply(&chunks);

        assert_eq!(word_count(&emitted[1].0), 35);
        assert!(emitted[1].0.starts_with(&chunks[0]));
    }

    #[test]
    fn test_donor_is_pre_overlap_text() {
        // Chunk 2's prefix must come from chunk 1's original text, not the
        // overlap-expanded version of chunk 1.
        let chunks = vec![
            numbered_chunk("a", 20),
            numbered_chunk("b", 20),
            numbered_chunk("c", 20),
        ];
        let windower = OverlapWindower::new(5);
        let emitted = windower.apply(&chunks);

        let prefix: Vec<&str> = emitted[2].0.split_whitespace().take(5).collect();
        assert_eq!(prefix, vec!["b15", "b16", "b17", "b18", "b19"]);
    }

    #[test]
    fn test_zero_overlap_disables_prefixing() {
        let chunks = vec![numbered_chunk("a", 10), numbered_chunk("b", 10)];
        let windower = OverlapWindower::new(0);
        let emitted = windower.apply(&chunks);

        assert!(emitted.iter().all(|(_, flagged)| !flagged));
        assert_eq!(emitted[1].0, chunks[1]);
    }

    #[test]
    fn test_last_words() {
        assert_eq!(last_words("one two three four", 2), "three four");
        assert_eq!(last_words("one two", 10), "one two");
        assert_eq!(last_words("", 3), "");
    }
}
