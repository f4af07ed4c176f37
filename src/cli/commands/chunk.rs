//! Chunk command implementation.

use crate::alignment::{format_range, TimedSegment};
use crate::chunking::{chunk_transcript, ChunkerConfig, SegmentationOutcome, SourceInfo};
use crate::cleaning::TranscriptCleaner;
use crate::cli::Output;
use crate::config::Settings;
use crate::text::{word_count, TextResources};
use anyhow::{Context, Result};

/// Options for the chunk command.
pub struct ChunkArgs {
    pub input: String,
    pub segments: Option<String>,
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub output: Option<String>,
    pub auto_tune: bool,
    pub clean: bool,
    pub stats: bool,
}

/// Run the chunk command.
pub fn run_chunk(args: ChunkArgs, settings: Settings) -> Result<()> {
    let input_path = Settings::expand_path(&args.input);
    let text = std::fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read transcript: {}", input_path.display()))?;

    let text = if args.clean {
        let cleaner = TranscriptCleaner::new();
        let cleaned = cleaner.clean(&text);
        Output::info(&format!(
            "Cleaned transcript: {} -> {} words",
            word_count(&text),
            word_count(&cleaned)
        ));
        cleaned
    } else {
        text
    };

    let segments = match &args.segments {
        Some(path) => {
            let segments_path = Settings::expand_path(path);
            let content = std::fs::read_to_string(&segments_path)
                .with_context(|| format!("Failed to read segments: {}", segments_path.display()))?;
            let parsed: Vec<TimedSegment> =
                serde_json::from_str(&content).context("Failed to parse timed segments JSON")?;
            Output::info(&format!("Loaded {} timed segments", parsed.len()));
            Some(parsed)
        }
        None => None,
    };

    let mut config = settings.chunking.to_config()?;
    if args.auto_tune || settings.chunking.auto_tune {
        let words = word_count(&text);
        let tuned = ChunkerConfig::tuned_for(words);
        Output::info(&format!(
            "Document has {} words, using w={}, k={}",
            words, tuned.window_size, tuned.smoothing_depth
        ));
        config.window_size = tuned.window_size;
        config.smoothing_depth = tuned.smoothing_depth;
    }

    let source = SourceInfo::new(args.video_id.clone(), args.title.clone());
    let resources = TextResources::new();

    let spinner = Output::spinner("Segmenting transcript...");
    let result = chunk_transcript(&text, segments.as_deref(), &source, &config, &resources);
    spinner.finish_and_clear();

    let chunk_set = result?;

    let strategy = match chunk_set.outcome {
        SegmentationOutcome::TopicSplitAccepted { boundaries } => {
            format!("topic split, {} boundaries", boundaries)
        }
        SegmentationOutcome::FallbackUsed => "fallback segmentation".to_string(),
    };
    Output::success(&format!(
        "Segmented into {} chunks ({})",
        chunk_set.len(),
        strategy
    ));

    if args.stats {
        let stats = chunk_set.stats();
        Output::header("Chunk statistics");
        Output::kv("total chunks", &stats.total_chunks.to_string());
        Output::kv("total words", &stats.total_words.to_string());
        Output::kv("min words", &stats.min_words.to_string());
        Output::kv("max words", &stats.max_words.to_string());
        Output::kv("avg words", &format!("{:.1}", stats.avg_words));

        for chunk in &chunk_set.chunks {
            let range = match (chunk.start_time, chunk.end_time) {
                (Some(start), Some(end)) => Some(format_range(start, end)),
                _ => None,
            };
            Output::chunk_line(chunk.chunk_id, chunk.word_count, range.as_deref(), &chunk.text);
        }
    }

    let json = serde_json::to_string_pretty(&chunk_set.chunks)?;
    match &args.output {
        Some(path) => {
            let output_path = Settings::expand_path(path);
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
            Output::success(&format!("Wrote chunk records to {}", output_path.display()));
        }
        None => println!("{}", json),
    }

    Ok(())
}
