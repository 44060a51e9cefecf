//! Structured reply parsing for judge output.
//!
//! Judges are asked for JSON, and usually comply, but the reply may still be
//! wrapped in a markdown code fence or surrounded by a sentence of prose.

use super::extraction::VerdictCandidate;
use super::value_objects::{MAX_SCORE, ScoreCard};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a structured reply could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuredReplyError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("reply is JSON but not an object")]
    NotAnObject,

    #[error("reply has no numeric \"score\" field")]
    MissingScore,
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches("json"),
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse a reply as a JSON object.
///
/// Tries the fence-stripped reply first, then the outermost `{...}` span.
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>, StructuredReplyError> {
    let body = strip_code_fences(text);
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(first_error) => {
            let span = body
                .find('{')
                .zip(body.rfind('}'))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &body[start..=end]);
            match span.and_then(|s| serde_json::from_str::<Value>(s).ok()) {
                Some(value) => value,
                None => return Err(StructuredReplyError::InvalidJson(first_error.to_string())),
            }
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StructuredReplyError::NotAnObject),
    }
}

/// Convert a JSON score to the 0..=10 domain.
///
/// Accepts integers, floats (rounded) and numeric strings; anything else is
/// treated as missing.
fn normalize_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, f64::from(MAX_SCORE)) as u8)
}

/// Parse a per-turn score reply: `{"score": 7, "reasoning": "..."}`
pub fn parse_score_card(text: &str) -> Result<ScoreCard, StructuredReplyError> {
    let object = parse_json_object(text)?;
    let score = object
        .get("score")
        .and_then(normalize_score)
        .ok_or(StructuredReplyError::MissingScore)?;
    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    Ok(ScoreCard { score, reasoning })
}

/// Map a judge-written name onto one of the debater names.
///
/// Exact match first, then case-insensitive trimmed match.
fn canonical_name(raw: &str, names: &[String; 2]) -> Option<String> {
    let trimmed = raw.trim();
    names
        .iter()
        .find(|n| n.as_str() == trimmed)
        .or_else(|| names.iter().find(|n| n.eq_ignore_ascii_case(trimmed)))
        .cloned()
}

/// Parse a final verdict reply: `{"winner": "A", "scores": {"A": 8, "B": 6}}`
///
/// Names are mapped onto the canonical debater names where possible; a
/// winner that matches neither is kept verbatim so the retry prompt can
/// quote it back.
pub fn parse_verdict_candidate(
    text: &str,
    names: &[String; 2],
) -> Result<VerdictCandidate, StructuredReplyError> {
    let object = parse_json_object(text)?;

    let winner = object.get("winner").and_then(|w| match w {
        Value::String(s) => Some(canonical_name(s, names).unwrap_or_else(|| s.clone())),
        Value::Null => None,
        other => Some(other.to_string()),
    });

    let mut scores = BTreeMap::new();
    if let Some(Value::Object(raw_scores)) = object.get("scores") {
        for (key, value) in raw_scores {
            let name = canonical_name(key, names).unwrap_or_else(|| key.trim().to_string());
            if let Some(score) = normalize_score(value) {
                scores.insert(name, score);
            }
        }
    }

    Ok(VerdictCandidate { winner, scores })
}

/// Resolve a free-text winner confirmation against the two debater names.
///
/// Exactly one name contained in the reply (case-insensitive) confirms it.
/// When both are contained, an exact match of the whole reply decides;
/// otherwise the confirmation is left unset.
pub fn confirm_winner(reply: &str, names: &[String; 2]) -> Option<String> {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '*' || c == '`')
        .trim();
    let lowered = cleaned.to_lowercase();

    let contained: Vec<&String> = names
        .iter()
        .filter(|n| !n.is_empty() && lowered.contains(&n.to_lowercase()))
        .collect();

    match contained.as_slice() {
        [only] => Some((*only).clone()),
        [_, _] => names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(cleaned))
            .cloned(),
        _ => None,
    }
}
