//! Structured verdict protocol
//!
//! A judge renders its verdict in four exchanges on its own history:
//!
//! 1. **Deliberation**: free-form private reasoning, kept verbatim.
//! 2. **Winner confirmation**: a one-name reply matched against the debaters.
//! 3. **Structured extraction**: up to [`MAX_EXTRACTION_ATTEMPTS`] JSON
//!    requests, each retry listing what the previous reply got wrong, then
//!    the deterministic fallback.
//! 4. **Announcement**: a short public statement in character.
//!
//! Between 3 and 4 the scores are repaired so the winner never holds the
//! lower one. Only parse failures degrade; generation failures propagate.

use super::participant::{Participant, ParticipantError};
use debate_domain::{
    DebatePrompt, Side, VerdictCandidate, VerdictProblem, VerdictResult, confirm_winner,
    parse_verdict_candidate, verdict::VerdictDecision,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Structured verdict requests before falling back
pub const MAX_EXTRACTION_ATTEMPTS: usize = 3;

/// A decision plus whether the fallback produced it
struct Extraction {
    decision: VerdictDecision,
    fallback_used: bool,
}

impl Participant {
    /// Deliver a final verdict on the two debaters in `names`.
    pub async fn verdict(
        &mut self,
        names: &[String; 2],
        premise: Option<&str>,
        sides: &BTreeMap<String, Side>,
    ) -> Result<VerdictResult, ParticipantError> {
        let prompt = DebatePrompt::deliberation(self.name(), names, premise, sides);
        let deliberation = self.chat(&prompt, false).await?;

        let confirmation = self
            .chat(&DebatePrompt::winner_confirmation(names), false)
            .await?;
        let confirmed = confirm_winner(&confirmation, names);
        debug!(judge = %self.name(), confirmed = ?confirmed, "winner confirmation");

        let Extraction {
            mut decision,
            fallback_used,
        } = self.extract_verdict(names, confirmed.as_deref()).await?;

        if decision.repair_inversion(names) {
            info!(
                judge = %self.name(),
                winner = %decision.winner,
                "Swapped inverted scores so the winner holds the higher score"
            );
        }

        let reasoning = self
            .chat(&DebatePrompt::verdict_announcement(self.name()), false)
            .await?;

        Ok(VerdictResult {
            winner: decision.winner,
            scores: decision.scores,
            reasoning,
            deliberation,
            fallback_used,
        })
    }

    async fn extract_verdict(
        &mut self,
        names: &[String; 2],
        confirmed: Option<&str>,
    ) -> Result<Extraction, ParticipantError> {
        let mut prompt = DebatePrompt::verdict_json(names, confirmed);
        let mut last: Option<VerdictCandidate> = None;

        for attempt in 1..=MAX_EXTRACTION_ATTEMPTS {
            let reply = self.chat(&prompt, true).await?;

            let problems = match parse_verdict_candidate(&reply, names) {
                Ok(candidate) => {
                    if let Some(decision) = VerdictDecision::from_candidate(&candidate, names) {
                        debug!(judge = %self.name(), attempt, "structured verdict accepted");
                        return Ok(Extraction {
                            decision,
                            fallback_used: false,
                        });
                    }
                    let problems = candidate.problems(names);
                    last = Some(candidate);
                    problems
                }
                Err(e) => {
                    debug!(judge = %self.name(), attempt, "unparseable verdict: {}", e);
                    vec![VerdictProblem::Unparseable]
                }
            };

            debug!(
                judge = %self.name(),
                attempt,
                problems = problems.len(),
                "structured verdict rejected"
            );
            prompt = DebatePrompt::verdict_retry(names, &problems);
        }

        let decision = VerdictDecision::fallback(last.as_ref(), names, confirmed);
        warn!(
            "Judge '{}' produced a malformed verdict after {} attempts; using fallback (winner='{}')",
            self.name(),
            MAX_EXTRACTION_ATTEMPTS,
            decision.winner
        );
        Ok(Extraction {
            decision,
            fallback_used: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGateway, fail, text};
    use debate_domain::Persona;
    use std::sync::Arc;

    const JUDGE: &str = "judge-model";

    fn names() -> [String; 2] {
        ["Ada".to_string(), "Brook".to_string()]
    }

    fn judge(gateway: &Arc<ScriptedGateway>) -> Participant {
        Participant::new(Persona::new("Judy", JUDGE), gateway.clone())
    }

    fn sides() -> BTreeMap<String, Side> {
        BTreeMap::from([
            ("Ada".to_string(), Side::For),
            ("Brook".to_string(), Side::Against),
        ])
    }

    fn count_structured(gateway: &ScriptedGateway) -> usize {
        gateway.requests().iter().filter(|r| r.structured).count()
    }

    #[tokio::test]
    async fn test_valid_first_attempt() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("Brook")])
                .on(
                    JUDGE,
                    "express that verdict",
                    vec![text(r#"{"winner": "Brook", "scores": {"Ada": 5, "Brook": 8}}"#)],
                )
                .on(JUDGE, "deliver your verdict", vec![text("Brook wins.")]),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), Some("P"), &sides()).await.unwrap();
        assert_eq!(result.winner, "Brook");
        assert_eq!(result.score_of("Brook"), Some(8));
        assert_eq!(result.reasoning, "Brook wins.");
        assert!(!result.fallback_used);
        assert_eq!(count_structured(&gateway), 1);

        let prompts = gateway.prompts_to(JUDGE);
        assert!(prompts[0].starts_with("The debate premise was:"));
        assert!(prompts[2].contains("must be exactly 'Brook'"));
    }

    #[tokio::test]
    async fn test_retry_lists_previous_problems() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("not sure")])
                .on(
                    JUDGE,
                    "express that verdict",
                    vec![text(r#"{"winner": "Carol", "scores": {"Ada": 7}}"#)],
                )
                .on(
                    JUDGE,
                    "previous response had problems",
                    vec![text(r#"{"winner": "Ada", "scores": {"Ada": 7, "Brook": 4}}"#)],
                ),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), None, &sides()).await.unwrap();
        assert_eq!(result.winner, "Ada");
        assert!(!result.fallback_used);
        assert_eq!(count_structured(&gateway), 2);

        let retry = gateway
            .prompts_to(JUDGE)
            .into_iter()
            .find(|p| p.contains("previous response had problems"))
            .unwrap();
        assert!(retry.contains("got 'Carol'"));
        assert!(retry.contains("missing an entry for 'Brook'"));
        assert!(!retry.contains("missing an entry for 'Ada'"));
    }

    #[tokio::test]
    async fn test_bounded_attempts_then_fallback_from_scores() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("hmm")])
                .on(
                    JUDGE,
                    "express that verdict",
                    vec![text(r#"{"scores": {"Ada": 6, "Brook": 3}}"#)],
                )
                .on(
                    JUDGE,
                    "previous response had problems",
                    vec![
                        text("not json at all"),
                        text(r#"{"winner": "nobody", "scores": {"Ada": 6, "Brook": 3}}"#),
                    ],
                ),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), None, &sides()).await.unwrap();
        assert_eq!(count_structured(&gateway), MAX_EXTRACTION_ATTEMPTS);
        assert!(result.fallback_used);
        assert_eq!(result.winner, "Ada");
        assert_eq!(result.score_of("Ada"), Some(6));
        assert_eq!(result.score_of("Brook"), Some(3));
    }

    #[tokio::test]
    async fn test_fallback_without_scores_is_neutral() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("I'd say brook, clearly")])
                .on_any("JSON", vec![text("nope"), text("nope"), text("nope")]),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), None, &sides()).await.unwrap();
        assert!(result.fallback_used);
        assert_eq!(result.winner, "Brook");
        assert_eq!(result.score_of("Ada"), Some(5));
        assert_eq!(result.score_of("Brook"), Some(5));
    }

    #[tokio::test]
    async fn test_inverted_scores_are_swapped() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("Ada")])
                .on(
                    JUDGE,
                    "express that verdict",
                    vec![text(r#"{"winner": "Ada", "scores": {"Ada": 4, "Brook": 7}}"#)],
                ),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), None, &sides()).await.unwrap();
        assert_eq!(result.winner, "Ada");
        assert_eq!(result.score_of("Ada"), Some(7));
        assert_eq!(result.score_of("Brook"), Some(4));
        assert!(result.score_of(&result.winner) >= result.score_of(result.loser(&names())));
    }

    #[tokio::test]
    async fn test_generation_failure_during_extraction_propagates() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "who won", vec![text("Ada")])
                .on(JUDGE, "express that verdict", vec![fail("connection reset")]),
        );
        let mut judy = judge(&gateway);

        let err = judy.verdict(&names(), None, &sides()).await.unwrap_err();
        assert!(err.is_generation());
    }

    #[tokio::test]
    async fn test_deliberation_is_kept_verbatim() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on(JUDGE, "The debate is over", vec![text("  Ada edged it.  ")])
                .on(JUDGE, "who won", vec![text("Ada")])
                .on(
                    JUDGE,
                    "express that verdict",
                    vec![text(r#"{"winner": "Ada", "scores": {"Ada": 7, "Brook": 6}}"#)],
                ),
        );
        let mut judy = judge(&gateway);

        let result = judy.verdict(&names(), None, &BTreeMap::new()).await.unwrap();
        assert_eq!(result.deliberation, "  Ada edged it.  ");
    }
}
