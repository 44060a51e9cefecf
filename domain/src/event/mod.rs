//! Debate event domain
//!
//! Events are the only thing the orchestration layer hands to the outside
//! world. Renderers, collectors and transcript writers consume them without
//! ever reaching back into participant state.

mod entities;

pub use entities::{DebateEvent, EventMetadata, EventType, HeaderMetadata, JudgeProfile};
