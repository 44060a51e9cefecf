//! Conversation domain.
//!
//! - [`Conversation`]: a participant's append-only message log
//! - [`Message`]: a single message within it

mod entities;

pub use entities::{Conversation, Message, Role};
