//! Presentation layer for llm-debate
//!
//! This crate contains the CLI definition, the live terminal renderer,
//! the batch progress printer and the statistics report.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::OutputConfig;
pub use output::{ConsoleListener, StatsFormatter};
pub use progress::reporter::BatchProgress;
