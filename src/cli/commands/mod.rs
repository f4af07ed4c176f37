//! CLI command implementations.

mod chunk;
mod clean;
mod config;

pub use chunk::{run_chunk, ChunkArgs};
pub use clean::run_clean;
pub use config::run_config;
