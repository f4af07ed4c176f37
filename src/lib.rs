//! Skive - Transcript Segmentation
//!
//! A topic-aware transcript segmentation engine for RAG pipelines.
//!
//! The name "Skive" comes from the Norwegian word for "slice."
//!
//! # Overview
//!
//! Skive converts a long, cleaned spoken-word transcript into an ordered
//! sequence of topic-coherent, size-bounded, optionally overlapping chunks,
//! each re-anchored to the time range it came from:
//!
//! - Lexical topic-boundary detection (TextTiling-style)
//! - Constraint-driven fallback segmentation when detection is unusable
//! - Sliding-window overlap between consecutive chunks
//! - Fuzzy timestamp re-alignment against the original timed captions
//!
//! The engine is pure and deterministic: it fetches nothing, stores nothing,
//! and holds no state between calls. Fetching transcripts, computing
//! embeddings, and indexing the resulting chunk records belong to external
//! collaborators.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `cleaning` - Raw transcript cleanup
//! - `text` - Shared linguistic resources (sentence splitter, stopwords)
//! - `chunking` - The segmentation pipeline
//! - `alignment` - Timestamp re-alignment
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust
//! use skive::chunking::{chunk_transcript, ChunkerConfig, SourceInfo};
//! use skive::text::TextResources;
//!
//! fn main() -> anyhow::Result<()> {
//!     let resources = TextResources::new();
//!     let config = ChunkerConfig::default();
//!     let source = SourceInfo::new(Some("dQw4w9WgXcQ".into()), None);
//!
//!     let text = "One topic here. Another sentence about it. A second topic now.";
//!     let chunks = chunk_transcript(text, None, &source, &config, &resources)?;
//!     println!("Produced {} chunks", chunks.len());
//!
//!     Ok(())
//! }
//! ```

pub mod alignment;
pub mod chunking;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod error;
pub mod text;

pub use error::{Result, SkiveError};
