//! CLI module for Skive.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skive - Transcript Segmentation
///
/// A topic-aware transcript segmentation engine for RAG pipelines.
/// The name "Skive" comes from the Norwegian word for "slice."
#[derive(Parser, Debug)]
#[command(name = "skive")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment a cleaned transcript into chunk records
    Chunk {
        /// Path to the transcript text file
        input: String,

        /// Path to a JSON file of timed segments ({text, start, duration})
        #[arg(short, long)]
        segments: Option<String>,

        /// Video ID carried into every chunk record
        #[arg(long)]
        video_id: Option<String>,

        /// Video title carried into every chunk record
        #[arg(long)]
        title: Option<String>,

        /// Output file for the JSON chunk records (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Tune detection parameters to the document length
        #[arg(long)]
        auto_tune: bool,

        /// Run transcript cleanup before segmenting
        #[arg(long)]
        clean: bool,

        /// Print chunk statistics after segmenting
        #[arg(long)]
        stats: bool,
    },

    /// Clean a raw transcript (fillers, stutters, broken punctuation)
    Clean {
        /// Path to the raw transcript text file
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
