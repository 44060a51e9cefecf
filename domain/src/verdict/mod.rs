//! Verdict domain
//!
//! Pure rules behind the judge's structured output:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`parse_score_card`] | Per-turn `{"score", "reasoning"}` reply |
//! | [`parse_verdict_candidate`] | Final `{"winner", "scores"}` reply |
//! | [`confirm_winner`] | Match a free-text winner confirmation to a debater |
//! | [`VerdictCandidate::problems`] | Constraint violations fed back on retry |
//! | [`VerdictDecision::fallback`] | Deterministic verdict when extraction never validates |
//! | [`VerdictDecision::repair_inversion`] | Keep the winner's score at or above the loser's |

mod extraction;
mod parsing;
mod value_objects;

pub use extraction::{VerdictCandidate, VerdictDecision, VerdictProblem};
pub use parsing::{
    StructuredReplyError, confirm_winner, parse_json_object, parse_score_card,
    parse_verdict_candidate, strip_code_fences,
};
pub use value_objects::{MAX_SCORE, NEUTRAL_SCORE, ScoreCard, VerdictResult};
