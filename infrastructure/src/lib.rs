//! Infrastructure layer for llm-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP generation backend, configuration
//! and debate file loading, lineup drawing and transcript logging.

pub mod config;
pub mod debate_file;
pub mod lineup;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileBackendConfig, FileConfig, FileDebateConfig, FileOutputConfig,
};
pub use debate_file::{DebateFile, DebateFileError};
pub use lineup::{ModelSelection, PersonaPicker};
pub use logging::{BatchResultsWriter, JsonlTranscriptWriter, results_path, transcript_path};
pub use providers::OpenAiCompatGateway;
