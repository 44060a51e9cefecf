//! Turn schedule after the opening statement
//!
//! The opener speaks first (outside this schedule); the remaining
//! `turns - 1` utterances alternate starting with the responder. The last
//! two entries are each debater's final statement.

use serde::{Deserialize, Serialize};

/// Which of the two debater seats speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Opener,
    Responder,
}

impl Seat {
    pub fn other(&self) -> Seat {
        match self {
            Seat::Opener => Seat::Responder,
            Seat::Responder => Seat::Opener,
        }
    }
}

/// One entry of the post-opening schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTurn {
    /// Zero-based iteration index after the opening
    pub index: usize,
    pub speaker: Seat,
    /// Closing-argument framing for this speaker
    pub is_final: bool,
}

/// Alternating schedule for a debate of `turns` total utterances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSchedule {
    remaining: usize,
}

impl TurnSchedule {
    pub fn new(turns: usize) -> Self {
        Self {
            remaining: turns.saturating_sub(1),
        }
    }

    /// Number of utterances after the opening
    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ScheduledTurn> + '_ {
        let remaining = self.remaining;
        (0..remaining).map(move |index| ScheduledTurn {
            index,
            speaker: if index % 2 == 0 {
                Seat::Responder
            } else {
                Seat::Opener
            },
            is_final: index + 2 >= remaining,
        })
    }
}
