//! Transcript segmentation pipeline.
//!
//! Converts a cleaned transcript into an ordered set of topic-coherent,
//! size-bounded, optionally overlapping chunks, each re-anchored to the time
//! range it came from when timed segments are supplied.
//!
//! The pipeline is a pure function of its inputs: detection proposes topic
//! boundaries, assembly validates them against the size bounds (falling back
//! to size-based segmentation on any violation), the windower adds sliding
//! overlap, and the mapper attaches best-effort timestamps.

mod assembler;
mod boundary;
mod fallback;
mod overlap;

pub use assembler::{ChunkAssembler, SegmentationOutcome};
pub use boundary::TopicBoundaryDetector;
pub use fallback::FallbackSegmenter;
pub use overlap::OverlapWindower;

use crate::alignment::{TimedSegment, TimestampMapper};
use crate::error::{Result, SkiveError};
use crate::text::{word_count, TextResources};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Lexical similarity formula used between adjacent blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMeasure {
    /// Token-set intersection normalized by block length.
    #[default]
    Overlap,
    /// Cosine over term-frequency vectors.
    Cosine,
}

impl std::str::FromStr for SimilarityMeasure {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlap" => Ok(SimilarityMeasure::Overlap),
            "cosine" => Ok(SimilarityMeasure::Cosine),
            _ => Err(format!("Unknown similarity measure: {}", s)),
        }
    }
}

/// Configuration for one segmentation call.
///
/// Passed explicitly per call; the pipeline holds no state between
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Tokens per pseudo-sentence block in boundary detection.
    pub window_size: usize,
    /// Smoothing strength applied to the similarity curve.
    pub smoothing_depth: usize,
    /// Depth threshold policy: `mean - depth_cutoff * stddev`.
    pub depth_cutoff: f64,
    /// Lexical similarity formula.
    pub similarity: SimilarityMeasure,
    /// Lower word bound per chunk.
    pub min_words: usize,
    /// Upper word bound per chunk.
    pub max_words: usize,
    /// Fallback grouping granularity before size repair.
    pub target_sentences: usize,
    /// Enable sliding-window overlap.
    pub use_overlap: bool,
    /// Words carried from the end of chunk i-1 into the start of chunk i.
    pub overlap_words: usize,
    /// Minimum match score before timestamp interpolation kicks in.
    pub alignment_tolerance: f64,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            smoothing_depth: 10,
            depth_cutoff: 1.0,
            similarity: SimilarityMeasure::Overlap,
            min_words: 100,
            max_words: 300,
            target_sentences: 15,
            use_overlap: true,
            overlap_words: 25,
            alignment_tolerance: 0.5,
        }
    }
}

impl ChunkerConfig {
    /// Defaults with detection parameters tuned to the document length.
    ///
    /// Short documents get finer granularity, long ones broader topics.
    /// Opt-in: the pipeline itself never adjusts parameters.
    pub fn tuned_for(word_count: usize) -> Self {
        let (window_size, smoothing_depth) = if word_count < 1000 {
            (15, 10)
        } else if word_count > 4000 {
            (30, 15)
        } else {
            (20, 10)
        };

        Self {
            window_size,
            smoothing_depth,
            ..Self::default()
        }
    }

    /// Check bounds and parameters that would make segmentation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SkiveError::Config("window_size must be positive".into()));
        }
        if self.max_words == 0 {
            return Err(SkiveError::Config("max_words must be positive".into()));
        }
        if self.min_words > self.max_words {
            return Err(SkiveError::Config(format!(
                "min_words ({}) exceeds max_words ({})",
                self.min_words, self.max_words
            )));
        }
        if !(0.0..=1.0).contains(&self.alignment_tolerance) {
            return Err(SkiveError::Config(
                "alignment_tolerance must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

/// Identity of the source document, carried into every chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    pub video_id: Option<String>,
    pub video_title: Option<String>,
}

impl SourceInfo {
    pub fn new(video_id: Option<String>, video_title: Option<String>) -> Self {
        Self {
            video_id,
            video_title,
        }
    }
}

/// One emitted chunk record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based position in the chunk set.
    pub chunk_id: usize,
    /// Emitted text, overlap prefix included.
    pub text: String,
    /// Whitespace-separated word count of `text`.
    pub word_count: usize,
    /// Character count of `text`.
    pub char_count: usize,
    /// Whether this chunk starts with the previous chunk's tail.
    pub has_overlap: bool,
    /// Start time in seconds, when timed segments were supplied.
    pub start_time: Option<f64>,
    /// End time in seconds, when timed segments were supplied.
    pub end_time: Option<f64>,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
}

/// The ordered chunks for one document plus the segmentation decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkSet {
    pub chunks: Vec<Chunk>,
    pub outcome: SegmentationOutcome,
}

impl ChunkSet {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Summary statistics for reporting.
    pub fn stats(&self) -> ChunkingStats {
        let word_counts: Vec<usize> = self.chunks.iter().map(|c| c.word_count).collect();
        let total_words = word_counts.iter().sum();

        ChunkingStats {
            total_chunks: self.chunks.len(),
            total_words,
            min_words: word_counts.iter().min().copied().unwrap_or(0),
            max_words: word_counts.iter().max().copied().unwrap_or(0),
            avg_words: if self.chunks.is_empty() {
                0.0
            } else {
                total_words as f64 / self.chunks.len() as f64
            },
        }
    }
}

/// Aggregate chunk-size statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_words: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub avg_words: f64,
}

/// Segment a cleaned transcript into chunk records.
///
/// Pure and deterministic: identical inputs produce identical output. Empty
/// or whitespace-only text yields an empty set; there is no fatal error path
/// past configuration validation.
pub fn chunk_transcript(
    text: &str,
    segments: Option<&[TimedSegment]>,
    source: &SourceInfo,
    config: &ChunkerConfig,
    resources: &TextResources,
) -> Result<ChunkSet> {
    config.validate()?;

    if text.trim().is_empty() {
        debug!("Empty input, returning empty chunk set");
        return Ok(ChunkSet {
            chunks: Vec::new(),
            outcome: SegmentationOutcome::FallbackUsed,
        });
    }

    let sentences = resources.splitter.split(text);

    let detector = TopicBoundaryDetector::new(config, &resources.stopwords);
    let boundaries = detector.detect(&sentences);

    let assembler = ChunkAssembler::new(config);
    let (bodies, outcome) = assembler.assemble(&sentences, &boundaries);

    // Word offsets of each pre-overlap chunk, for interpolation fallback.
    let body_words: Vec<usize> = bodies.iter().map(|b| word_count(b)).collect();
    let total_words: usize = body_words.iter().sum();
    let mut offsets = Vec::with_capacity(bodies.len());
    let mut running = 0usize;
    for &words in &body_words {
        offsets.push(running);
        running += words;
    }

    let emitted: Vec<(String, bool)> = if config.use_overlap {
        OverlapWindower::new(config.overlap_words).apply(&bodies)
    } else {
        bodies.iter().map(|b| (b.clone(), false)).collect()
    };

    // Timestamps come from the chunk's own body, not the overlap prefix, so
    // times describe the chunk's content. The cursor and the clamp keep
    // start times non-decreasing across the document.
    let times: Vec<(Option<f64>, Option<f64>)> = match segments {
        Some(segs) if !segs.is_empty() => {
            let mapper = TimestampMapper::new(segs);
            let mut cursor = 0usize;
            let mut previous_start = f64::MIN;
            bodies
                .iter()
                .enumerate()
                .map(|(i, body)| {
                    let span = (offsets[i], offsets[i] + body_words[i]);
                    let (alignment, next_cursor) = mapper.map_range(
                        body,
                        span,
                        total_words,
                        config.alignment_tolerance,
                        cursor,
                    );
                    cursor = next_cursor;

                    let (start, end) = alignment.range();
                    let start = start.max(previous_start);
                    let end = end.max(start);
                    previous_start = start;
                    (Some(start), Some(end))
                })
                .collect()
        }
        _ => vec![(None, None); bodies.len()],
    };

    let chunks: Vec<Chunk> = emitted
        .into_iter()
        .zip(times)
        .enumerate()
        .map(|(chunk_id, ((text, has_overlap), (start_time, end_time)))| Chunk {
            chunk_id,
            word_count: word_count(&text),
            char_count: text.chars().count(),
            text,
            has_overlap,
            start_time,
            end_time,
            video_id: source.video_id.clone(),
            video_title: source.video_title.clone(),
        })
        .collect();

    info!(
        chunks = chunks.len(),
        words = total_words,
        ?outcome,
        "Segmented transcript"
    );

    Ok(ChunkSet { chunks, outcome })
}
