//! Statistics computation over run records

use super::record::RunRecord;
use crate::participant::Side;
use serde::Serialize;

fn ratio(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Per-debater performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebaterStats {
    pub name: String,
    /// Side the debater argued the first time they had one
    pub side: Option<Side>,
    pub n: usize,
    pub wins: usize,
    pub win_rate: Option<f64>,
    pub avg_score: Option<f64>,
}

/// Per-model debater performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDebaterStats {
    pub name: String,
    pub n: usize,
    pub wins: usize,
    pub win_rate: Option<f64>,
    pub avg_score: Option<f64>,
}

/// Per-judge (or per-judge-model) premise decisions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeStats {
    pub name: String,
    pub n: usize,
    pub upheld: usize,
    pub rejected: usize,
    pub completed: usize,
    pub uphold_rate: Option<f64>,
    /// Uphold rate minus the overall uphold rate
    pub bias: Option<f64>,
}

/// Whether opening the debate helps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub n: usize,
    pub first_wins: usize,
    pub first_win_rate: f64,
    pub second_wins: usize,
    pub second_win_rate: f64,
}

/// Whether arguing `for` or `against` helps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideStats {
    pub n: usize,
    pub for_wins: usize,
    pub for_win_rate: Option<f64>,
    pub against_wins: usize,
    pub against_win_rate: Option<f64>,
}

/// Aggregates over a batch of runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateStatistics {
    pub total: usize,
    /// Runs with a decided premise outcome
    pub completed: usize,
    pub upheld: usize,
    pub rejected: usize,
    pub uphold_rate: Option<f64>,
    pub debaters: Vec<DebaterStats>,
    pub judges: Vec<JudgeStats>,
    pub model_debaters: Vec<ModelDebaterStats>,
    pub model_judges: Vec<JudgeStats>,
    pub order: Option<OrderStats>,
    pub sides: SideStats,
}

#[derive(Default)]
struct Tally {
    n: usize,
    wins: usize,
    score_sum: u32,
    score_n: usize,
}

impl Tally {
    fn record(&mut self, record: &RunRecord, name: &str) {
        self.n += 1;
        if record.winner.as_deref() == Some(name) {
            self.wins += 1;
        }
        if let Some(score) = record.score_of(name) {
            self.score_sum += u32::from(score);
            self.score_n += 1;
        }
    }

    fn win_rate(&self) -> Option<f64> {
        ratio(self.wins, self.n)
    }

    fn avg_score(&self) -> Option<f64> {
        (self.score_n > 0).then(|| round_to(self.score_sum as f64 / self.score_n as f64, 1))
    }
}

#[derive(Default)]
struct PremiseTally {
    n: usize,
    upheld: usize,
    rejected: usize,
}

impl PremiseTally {
    fn record(&mut self, record: &RunRecord) {
        self.n += 1;
        match record.premise_upheld {
            Some(true) => self.upheld += 1,
            Some(false) => self.rejected += 1,
            None => {}
        }
    }

    fn into_stats(self, name: String, overall: Option<f64>) -> JudgeStats {
        let completed = self.upheld + self.rejected;
        let uphold_rate = ratio(self.upheld, completed);
        let bias = uphold_rate
            .zip(overall)
            .map(|(rate, overall)| round_to(rate - overall, 3));
        JudgeStats {
            name,
            n: self.n,
            upheld: self.upheld,
            rejected: self.rejected,
            completed,
            uphold_rate,
            bias,
        }
    }
}

/// Insertion-ordered accumulator keyed by name
struct Ledger<T> {
    entries: Vec<(String, T)>,
}

impl<T: Default> Ledger<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut T {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), T::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

impl DebateStatistics {
    pub fn compute(records: &[RunRecord]) -> Self {
        let completed = records.iter().filter(|r| r.premise_upheld.is_some()).count();
        let upheld = records
            .iter()
            .filter(|r| r.premise_upheld == Some(true))
            .count();
        let rejected = completed - upheld;
        let uphold_rate = ratio(upheld, completed);

        Self {
            total: records.len(),
            completed,
            upheld,
            rejected,
            uphold_rate,
            debaters: Self::debaters(records),
            judges: Self::judges(records, uphold_rate, |r| r.judge.as_deref()),
            model_debaters: Self::model_debaters(records),
            model_judges: Self::judges(records, uphold_rate, |r| r.model_judge.as_deref()),
            order: Self::order(records),
            sides: Self::sides(records),
        }
    }

    fn debaters(records: &[RunRecord]) -> Vec<DebaterStats> {
        let mut ledger: Ledger<(Option<Side>, Tally)> = Ledger::new();
        for record in records {
            for name in &record.debaters {
                let (first_side, tally) = ledger.entry(name);
                if first_side.is_none() {
                    *first_side = record.side_of(name);
                }
                tally.record(record, name);
            }
        }

        let mut stats: Vec<DebaterStats> = ledger
            .entries
            .into_iter()
            .map(|(name, (side, tally))| DebaterStats {
                side,
                n: tally.n,
                wins: tally.wins,
                win_rate: tally.win_rate(),
                avg_score: tally.avg_score(),
                name,
            })
            .collect();
        stats.sort_by(|a, b| {
            b.win_rate
                .unwrap_or(0.0)
                .total_cmp(&a.win_rate.unwrap_or(0.0))
        });
        stats
    }

    fn model_debaters(records: &[RunRecord]) -> Vec<ModelDebaterStats> {
        let mut ledger: Ledger<Tally> = Ledger::new();
        for record in records {
            for name in &record.debaters {
                if let Some(model) = record.model_of(name) {
                    ledger.entry(model).record(record, name);
                }
            }
        }

        let mut stats: Vec<ModelDebaterStats> = ledger
            .entries
            .into_iter()
            .map(|(name, tally)| ModelDebaterStats {
                name,
                n: tally.n,
                wins: tally.wins,
                win_rate: tally.win_rate(),
                avg_score: tally.avg_score(),
            })
            .collect();
        stats.sort_by(|a, b| {
            b.win_rate
                .unwrap_or(0.0)
                .total_cmp(&a.win_rate.unwrap_or(0.0))
        });
        stats
    }

    fn judges(
        records: &[RunRecord],
        overall: Option<f64>,
        key: impl Fn(&RunRecord) -> Option<&str>,
    ) -> Vec<JudgeStats> {
        let mut ledger: Ledger<PremiseTally> = Ledger::new();
        for record in records {
            if let Some(name) = key(record) {
                ledger.entry(name).record(record);
            }
        }
        let mut stats: Vec<JudgeStats> = ledger
            .entries
            .into_iter()
            .map(|(name, tally)| tally.into_stats(name, overall))
            .collect();
        stats.sort_by(|a, b| b.n.cmp(&a.n));
        stats
    }

    fn order(records: &[RunRecord]) -> Option<OrderStats> {
        let decided: Vec<&RunRecord> = records
            .iter()
            .filter(|r| r.first_speaker.is_some() && r.winner.is_some())
            .collect();
        if decided.is_empty() {
            return None;
        }
        let n = decided.len();
        let first_wins = decided
            .iter()
            .filter(|r| r.winner == r.first_speaker)
            .count();
        let second_wins = n - first_wins;
        Some(OrderStats {
            n,
            first_wins,
            first_win_rate: first_wins as f64 / n as f64,
            second_wins,
            second_win_rate: second_wins as f64 / n as f64,
        })
    }

    fn sides(records: &[RunRecord]) -> SideStats {
        let decided: Vec<&RunRecord> = records.iter().filter(|r| r.winner.is_some()).collect();
        let n = decided.len();
        let for_wins = decided
            .iter()
            .filter(|r| r.winner_side() == Some(Side::For))
            .count();
        let against_wins = decided
            .iter()
            .filter(|r| r.winner_side() == Some(Side::Against))
            .count();
        SideStats {
            n,
            for_wins,
            for_win_rate: ratio(for_wins, n),
            against_wins,
            against_win_rate: ratio(against_wins, n),
        }
    }
}
