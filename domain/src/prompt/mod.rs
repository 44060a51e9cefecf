//! Prompt domain
//!
//! Fixed prompt templates for every conversational operation of a debate.

mod template;

pub use template::DebatePrompt;
