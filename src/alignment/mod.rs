//! Fuzzy timestamp re-alignment.
//!
//! Cleaned chunks drift from the original captions: cleanup may have
//! altered, merged, or dropped words, so matching a chunk back to its timed
//! segments is approximate by construction. The mapper fuzzily locates the
//! segments best matching a chunk's opening and closing tokens; when no
//! confident match exists it falls back to a proportional estimate, so a
//! chunk always receives a time range when segments are supplied.

use crate::text::normalize_tokens;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// How many words from each end of a chunk participate in matching.
const PROBE_WORDS: usize = 8;

/// A unit of the original (pre-cleaning) transcript with timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedSegment {
    /// Caption text as originally transcribed.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TimedSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Outcome of aligning one chunk against the timed segments.
///
/// `Matched` carries the minimum of the opening/closing match scores so
/// callers can distinguish confident attribution from a best-effort
/// estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Matched {
        confidence: f64,
        start: f64,
        end: f64,
    },
    Interpolated {
        start: f64,
        end: f64,
    },
}

impl Alignment {
    /// The `(start, end)` time range in seconds.
    pub fn range(&self) -> (f64, f64) {
        match *self {
            Alignment::Matched { start, end, .. } => (start, end),
            Alignment::Interpolated { start, end } => (start, end),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Alignment::Matched { .. })
    }
}

/// Maps chunk text back to time ranges in the source segments.
///
/// Built once per document; holds only normalized copies of the segment
/// tokens and the document time span.
pub struct TimestampMapper {
    segment_tokens: Vec<Vec<String>>,
    starts: Vec<f64>,
    ends: Vec<f64>,
    doc_start: f64,
    doc_end: f64,
}

impl TimestampMapper {
    pub fn new(segments: &[TimedSegment]) -> Self {
        let segment_tokens = segments
            .iter()
            .map(|s| normalize_tokens(&s.text))
            .collect();
        let starts: Vec<f64> = segments.iter().map(|s| s.start).collect();
        let ends: Vec<f64> = segments.iter().map(|s| s.end()).collect();

        let doc_start = starts.first().copied().unwrap_or(0.0);
        let doc_end = ends.last().copied().unwrap_or(0.0);

        Self {
            segment_tokens,
            starts,
            ends,
            doc_start,
            doc_end,
        }
    }

    /// Align one chunk, searching segments from `search_from` onwards.
    ///
    /// `chunk_span` is the chunk's `(first, last)` word offset in the
    /// pre-overlap document and `total_words` the document word count; both
    /// drive the proportional estimate when matching stays below
    /// `tolerance`. Returns the alignment and the segment cursor the next
    /// chunk should search from.
    pub fn map_range(
        &self,
        chunk_text: &str,
        chunk_span: (usize, usize),
        total_words: usize,
        tolerance: f64,
        search_from: usize,
    ) -> (Alignment, usize) {
        let tokens = normalize_tokens(chunk_text);
        if tokens.is_empty() || self.segment_tokens.is_empty() {
            return (self.interpolate(chunk_span, total_words), search_from);
        }

        let probe = tokens.len().min(PROBE_WORDS);
        let opening = &tokens[..probe];
        let closing = &tokens[tokens.len() - probe..];

        let (start_idx, start_score) = self.best_forward_match(opening, search_from);
        let (end_idx, end_score) = self.best_backward_match(closing, start_idx);

        if start_score >= tolerance && end_score >= tolerance {
            let start = self.starts[start_idx];
            let end = self.ends[end_idx].max(start);
            let confidence = start_score.min(end_score);
            debug!(confidence, start, end, "Chunk matched to segments");
            (
                Alignment::Matched {
                    confidence,
                    start,
                    end,
                },
                start_idx,
            )
        } else {
            debug!(
                start_score,
                end_score, tolerance, "Match below tolerance, interpolating"
            );
            (self.interpolate(chunk_span, total_words), search_from)
        }
    }

    /// First segment whose token window best contains the opening tokens.
    fn best_forward_match(&self, needle: &[String], from: usize) -> (usize, f64) {
        let count = self.segment_tokens.len();
        let from = from.min(count - 1);

        let mut best = (from, 0.0);
        for i in from..count {
            let mut window: Vec<&str> = Vec::new();
            for segment in &self.segment_tokens[i..] {
                window.extend(segment.iter().map(|t| t.as_str()));
                if window.len() >= needle.len() {
                    break;
                }
            }
            let score = containment(needle, &window);
            if score > best.1 {
                best = (i, score);
            }
        }
        best
    }

    /// Last segment whose token window best contains the closing tokens.
    fn best_backward_match(&self, needle: &[String], from: usize) -> (usize, f64) {
        let count = self.segment_tokens.len();

        let mut best = (from.min(count - 1), 0.0);
        for i in from..count {
            let mut window: Vec<&str> = Vec::new();
            for segment in self.segment_tokens[..=i].iter().rev() {
                window.extend(segment.iter().map(|t| t.as_str()));
                if window.len() >= needle.len() {
                    break;
                }
            }
            let score = containment(needle, &window);
            if score >= best.1 {
                best = (i, score);
            }
        }
        best
    }

    /// Proportional estimate from the chunk's word-offset fraction within
    /// the document, against the total document time span.
    fn interpolate(&self, chunk_span: (usize, usize), total_words: usize) -> Alignment {
        if total_words == 0 {
            return Alignment::Interpolated {
                start: self.doc_start,
                end: self.doc_end,
            };
        }

        let span_seconds = self.doc_end - self.doc_start;
        let start_fraction = chunk_span.0 as f64 / total_words as f64;
        let end_fraction = chunk_span.1 as f64 / total_words as f64;

        let start = self.doc_start + start_fraction * span_seconds;
        let end = (self.doc_start + end_fraction * span_seconds).max(start);
        Alignment::Interpolated { start, end }
    }
}

/// Fraction of needle tokens present in the window.
fn containment(needle: &[String], window: &[&str]) -> f64 {
    if needle.is_empty() {
        return 0.0;
    }

    let window_set: HashSet<&str> = window.iter().copied().collect();
    let found = needle
        .iter()
        .filter(|t| window_set.contains(t.as_str()))
        .count();
    found as f64 / needle.len() as f64
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Format a time range for display.
pub fn format_range(start: f64, end: f64) -> String {
    format!("{} - {}", format_timestamp(start), format_timestamp(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<TimedSegment> {
        vec![
            TimedSegment::new("hello world how are you", 0.0, 2.0),
            TimedSegment::new("today we learn about rust programming", 2.0, 3.0),
            TimedSegment::new("rust is a systems language", 5.0, 3.5),
        ]
    }

    #[test]
    fn test_exact_match_takes_segment_times() {
        let mapper = TimestampMapper::new(&segments());
        let chunk = "today we learn about rust programming rust is a systems language";

        let (alignment, cursor) = mapper.map_range(chunk, (5, 16), 16, 0.5, 0);

        assert!(alignment.is_matched());
        let (start, end) = alignment.range();
        assert_eq!(start, 2.0);
        assert_eq!(end, 8.5);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_unmatchable_chunk_interpolates() {
        let mapper = TimestampMapper::new(&[
            TimedSegment::new("alpha beta gamma", 0.0, 300.0),
            TimedSegment::new("delta epsilon zeta", 300.0, 300.0),
        ]);
        let chunk = "completely different vocabulary appears here instead";

        let (alignment, cursor) = mapper.map_range(chunk, (100, 200), 400, 0.5, 0);

        assert!(!alignment.is_matched());
        let (start, end) = alignment.range();
        assert_eq!(start, 150.0);
        assert_eq!(end, 300.0);
        assert!(start <= end);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_search_from_skips_earlier_segments() {
        let repeated = vec![
            TimedSegment::new("the lesson begins now", 0.0, 2.0),
            TimedSegment::new("some middle content here", 2.0, 2.0),
            TimedSegment::new("the lesson begins now", 4.0, 2.0),
        ];
        let mapper = TimestampMapper::new(&repeated);

        let (alignment, _) = mapper.map_range("the lesson begins now", (0, 4), 12, 0.5, 2);

        let (start, _) = alignment.range();
        assert_eq!(start, 4.0);
    }

    #[test]
    fn test_empty_segments_interpolate_to_zero() {
        let mapper = TimestampMapper::new(&[]);
        let (alignment, _) = mapper.map_range("anything at all", (0, 3), 3, 0.5, 0);

        assert!(!alignment.is_matched());
        assert_eq!(alignment.range(), (0.0, 0.0));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(3665.0), "01:01:05");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(134.5, 185.2), "02:14 - 03:05");
    }
}
