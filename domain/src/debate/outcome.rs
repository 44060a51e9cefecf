//! Premise interpretation of a verdict

use crate::participant::Side;
use std::collections::BTreeMap;

/// Whether the verdict upheld the premise.
///
/// `Some(true)` when the winner argued `for`, `Some(false)` when the winner
/// argued `against`, `None` when there is no premise, no winner, or the
/// winner has no assigned side. Undecidable is never folded into `false`.
pub fn premise_outcome(
    premise: Option<&str>,
    sides: &BTreeMap<String, Side>,
    winner: Option<&str>,
) -> Option<bool> {
    premise?;
    let side = sides.get(winner?)?;
    Some(side.is_affirmative())
}
