//! Error types for Skive.

use thiserror::Error;

/// Library-level error type for Skive operations.
///
/// The segmentation pipeline itself has no fatal error path: degenerate
/// input routes to the fallback segmenter and uncertain alignment produces
/// an interpolated estimate. These variants cover the boundary concerns
/// around the core: invalid configuration and settings-file handling.
#[derive(Error, Debug)]
pub enum SkiveError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Skive operations.
pub type Result<T> = std::result::Result<T, SkiveError>;
