//! Logging infrastructure: structured debate transcripts and batch results.
//!
//! Provides [`JsonlTranscriptWriter`], a JSONL file writer that implements
//! the [`DebateListener`](debate_application::DebateListener) port, and
//! [`BatchResultsWriter`], which keeps one JSONL row per finished run.

mod jsonl_transcript;
mod results;

pub use jsonl_transcript::{JsonlTranscriptWriter, transcript_path};
pub use results::{BatchResultsWriter, results_path};
