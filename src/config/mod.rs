//! Configuration management for Skive.

mod settings;

pub use settings::{ChunkingSettings, GeneralSettings, Settings};
