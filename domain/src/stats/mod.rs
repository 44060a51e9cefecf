//! Aggregate statistics over repeated debate runs
//!
//! - [`RunRecord`]: one completed run
//! - [`DebateStatistics`]: premise, debater, judge, model, order and side tables

mod compute;
mod record;

pub use compute::{
    DebateStatistics, DebaterStats, JudgeStats, ModelDebaterStats, OrderStats, SideStats,
};
pub use record::RunRecord;
