//! Clean command implementation.

use crate::cleaning::TranscriptCleaner;
use crate::cli::Output;
use crate::config::Settings;
use crate::text::word_count;
use anyhow::{Context, Result};

/// Run the clean command.
pub fn run_clean(input: &str, output: Option<String>) -> Result<()> {
    let input_path = Settings::expand_path(input);
    let text = std::fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read transcript: {}", input_path.display()))?;

    let cleaner = TranscriptCleaner::new();
    let cleaned = cleaner.clean(&text);

    Output::success(&format!(
        "Cleaned transcript: {} -> {} words",
        word_count(&text),
        word_count(&cleaned)
    ));

    match output {
        Some(path) => {
            let output_path = Settings::expand_path(&path);
            std::fs::write(&output_path, cleaned)
                .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
            Output::success(&format!("Wrote cleaned transcript to {}", output_path.display()));
        }
        None => println!("{}", cleaned),
    }

    Ok(())
}
