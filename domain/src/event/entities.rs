//! Debate event entities

use crate::participant::{DEFAULT_COLOR, Side};
use serde::Serialize;
use std::collections::BTreeMap;

/// Closed set of event tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Debate metadata: topic, participants
    Header,
    /// Pre-debate planning (private)
    Plan,
    /// Mid-debate reflection (private)
    Think,
    /// Public statement
    Turn,
    /// Judge scores a speaker
    Score,
    /// Judge's final verdict
    Verdict,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Header => "HEADER",
            EventType::Plan => "PLAN",
            EventType::Think => "THINK",
            EventType::Turn => "TURN",
            EventType::Score => "SCORE",
            EventType::Verdict => "VERDICT",
        }
    }

    /// Private reasoning never shown to the opponent
    pub fn is_private(&self) -> bool {
        matches!(self, EventType::Plan | EventType::Think)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Judge profile carried by the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JudgeProfile {
    pub name: String,
    pub color: String,
    pub personality: String,
    pub judging_criteria: String,
    pub model: String,
}

/// Metadata of a HEADER event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMetadata {
    pub topic: String,
    pub premise: Option<String>,
    pub sides: BTreeMap<String, Side>,
    /// Debater names, opener first
    pub participants: Vec<String>,
    pub colors: BTreeMap<String, String>,
    pub personalities: BTreeMap<String, String>,
    pub models: BTreeMap<String, String>,
    pub judge: Option<JudgeProfile>,
}

/// Type-specific metadata; the variant determines the event tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "metadata", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventMetadata {
    Header(Box<HeaderMetadata>),
    Plan,
    Think,
    Turn,
    Score {
        target: String,
        score: Option<u8>,
    },
    Verdict {
        winner: Option<String>,
        scores: BTreeMap<String, u8>,
        premise: Option<String>,
        premise_upheld: Option<bool>,
    },
}

impl EventMetadata {
    pub fn event_type(&self) -> EventType {
        match self {
            EventMetadata::Header(_) => EventType::Header,
            EventMetadata::Plan => EventType::Plan,
            EventMetadata::Think => EventType::Think,
            EventMetadata::Turn => EventType::Turn,
            EventMetadata::Score { .. } => EventType::Score,
            EventMetadata::Verdict { .. } => EventType::Verdict,
        }
    }
}

/// Immutable record of something observable that happened in a debate
///
/// Serializes as `{type, speaker, content, color, metadata}`; `metadata` is
/// omitted for PLAN, THINK and TURN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateEvent {
    /// Empty for pure-metadata events
    pub speaker: String,
    pub content: String,
    pub color: String,
    #[serde(flatten)]
    pub metadata: EventMetadata,
}

impl DebateEvent {
    pub fn new(
        metadata: EventMetadata,
        speaker: impl Into<String>,
        content: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
            color: color.into(),
            metadata,
        }
    }

    pub fn header(metadata: HeaderMetadata) -> Self {
        Self::new(
            EventMetadata::Header(Box::new(metadata)),
            "",
            "",
            DEFAULT_COLOR,
        )
    }

    pub fn event_type(&self) -> EventType {
        self.metadata.event_type()
    }

    pub fn header_metadata(&self) -> Option<&HeaderMetadata> {
        match &self.metadata {
            EventMetadata::Header(header) => Some(header),
            _ => None,
        }
    }
}
