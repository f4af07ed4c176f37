//! Configuration settings for Skive.

use crate::chunking::{ChunkerConfig, SimilarityMeasure};
use crate::error::{Result, SkiveError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Segmentation settings, mirroring [`ChunkerConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Tokens per pseudo-sentence block in boundary detection.
    pub window_size: usize,
    /// Smoothing strength on the similarity curve.
    pub smoothing_depth: usize,
    /// Depth threshold policy constant.
    pub depth_cutoff: f64,
    /// Similarity measure (overlap, cosine).
    pub similarity: String,
    /// Lower word bound per chunk.
    pub min_words: usize,
    /// Upper word bound per chunk.
    pub max_words: usize,
    /// Fallback grouping granularity in sentences.
    pub target_sentences: usize,
    /// Enable sliding-window overlap.
    pub use_overlap: bool,
    /// Overlap size in words.
    pub overlap_words: usize,
    /// Minimum timestamp match score before interpolation.
    pub alignment_tolerance: f64,
    /// Tune detection parameters to document length automatically.
    pub auto_tune: bool,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        let config = ChunkerConfig::default();
        Self {
            window_size: config.window_size,
            smoothing_depth: config.smoothing_depth,
            depth_cutoff: config.depth_cutoff,
            similarity: "overlap".to_string(),
            min_words: config.min_words,
            max_words: config.max_words,
            target_sentences: config.target_sentences,
            use_overlap: config.use_overlap,
            overlap_words: config.overlap_words,
            alignment_tolerance: config.alignment_tolerance,
            auto_tune: false,
        }
    }
}

impl ChunkingSettings {
    /// Build the per-call pipeline configuration.
    pub fn to_config(&self) -> Result<ChunkerConfig> {
        let similarity: SimilarityMeasure = self
            .similarity
            .parse()
            .map_err(SkiveError::Config)?;

        Ok(ChunkerConfig {
            window_size: self.window_size,
            smoothing_depth: self.smoothing_depth,
            depth_cutoff: self.depth_cutoff,
            similarity,
            min_words: self.min_words,
            max_words: self.max_words,
            target_sentences: self.target_sentences,
            use_overlap: self.use_overlap,
            overlap_words: self.overlap_words,
            alignment_tolerance: self.alignment_tolerance,
        })
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SkiveError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skive")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
