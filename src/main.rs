//! Skive CLI entry point.

use anyhow::Result;
use clap::Parser;
use skive::cli::commands::{self, ChunkArgs};
use skive::cli::{Cli, Commands};
use skive::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("skive={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Chunk {
            input,
            segments,
            video_id,
            title,
            output,
            auto_tune,
            clean,
            stats,
        } => {
            commands::run_chunk(
                ChunkArgs {
                    input,
                    segments,
                    video_id,
                    title,
                    output,
                    auto_tune,
                    clean,
                    stats,
                },
                settings,
            )?;
        }

        Commands::Clean { input, output } => {
            commands::run_clean(&input, output)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
