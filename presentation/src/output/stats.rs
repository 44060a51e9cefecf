//! Batch statistics formatter

use super::style::Style;
use debate_domain::{DebateStatistics, stats::JudgeStats};

const MISSING: &str = "-";

fn percent(rate: Option<f64>) -> String {
    rate.map(|r| format!("{:.0}%", r * 100.0))
        .unwrap_or_else(|| MISSING.to_string())
}

fn bias(bias: Option<f64>) -> String {
    match bias {
        Some(b) if b >= 0.0 => format!("+{:.0}%", b * 100.0),
        Some(b) => format!("{:.0}%", b * 100.0),
        None => MISSING.to_string(),
    }
}

fn average(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Formats [`DebateStatistics`] as a plain-text report
pub struct StatsFormatter {
    style: Style,
}

impl StatsFormatter {
    pub fn new(color: bool) -> Self {
        Self {
            style: Style::new(color),
        }
    }

    fn judge_table(&self, out: &mut String, title: &str, label: &str, rows: &[JudgeStats]) {
        let width = if label == "Model" { 30 } else { 20 };
        out.push_str(&format!("  {}\n", self.style.bold(title)));
        out.push_str(&format!(
            "  {:<width$} {:>3}  {:>6}  {:>8}  {:>7}  {:>6}\n",
            label,
            "n",
            "Upheld",
            "Rejected",
            "Uphold%",
            "Bias",
            width = width
        ));
        for judge in rows {
            out.push_str(&format!(
                "  {:<width$} {:>3}  {:>6}  {:>8}  {:>7}  {:>6}\n",
                judge.name,
                judge.n,
                judge.upheld,
                judge.rejected,
                percent(judge.uphold_rate),
                bias(judge.bias),
                width = width
            ));
        }
        out.push('\n');
    }

    pub fn format(&self, stats: &DebateStatistics) -> String {
        let rule = "=".repeat(60);
        let mut out = format!("\n{}\n", rule);
        out.push_str(&format!(
            "  {}  ({} run{})\n\n",
            self.style.bold("STATISTICS"),
            stats.total,
            if stats.total == 1 { "" } else { "s" }
        ));

        if stats.completed > 0 {
            let rate = stats
                .uphold_rate
                .map(|r| format!("  ({})", percent(Some(r))))
                .unwrap_or_default();
            out.push_str(&format!(
                "  Premise result: {} upheld / {} rejected{}\n\n",
                stats.upheld, stats.rejected, rate
            ));
        }

        if !stats.debaters.is_empty() {
            out.push_str(&format!("  {}\n", self.style.bold("DEBATER PERFORMANCE")));
            out.push_str(&format!(
                "  {:<20} {:<8} {:>3}  {:>4}  {:>5}  {:>9}\n",
                "Name", "Side", "n", "Wins", "Win%", "Avg score"
            ));
            for debater in &stats.debaters {
                out.push_str(&format!(
                    "  {:<20} {:<8} {:>3}  {:>4}  {:>5}  {:>9}\n",
                    debater.name,
                    debater.side.map(|s| s.as_str()).unwrap_or(MISSING),
                    debater.n,
                    debater.wins,
                    percent(debater.win_rate),
                    average(debater.avg_score)
                ));
            }
            out.push('\n');
        }

        if !stats.judges.is_empty() {
            self.judge_table(&mut out, "JUDGE PROFILE", "Name", &stats.judges);
        }

        if !stats.model_debaters.is_empty() {
            out.push_str(&format!(
                "  {}\n",
                self.style.bold("MODEL PERFORMANCE (as debater)")
            ));
            out.push_str(&format!(
                "  {:<30} {:>3}  {:>4}  {:>5}  {:>9}\n",
                "Model", "n", "Wins", "Win%", "Avg score"
            ));
            for model in &stats.model_debaters {
                out.push_str(&format!(
                    "  {:<30} {:>3}  {:>4}  {:>5}  {:>9}\n",
                    model.name,
                    model.n,
                    model.wins,
                    percent(model.win_rate),
                    average(model.avg_score)
                ));
            }
            out.push('\n');
        }

        if !stats.model_judges.is_empty() {
            self.judge_table(
                &mut out,
                "MODEL PERFORMANCE (as judge)",
                "Model",
                &stats.model_judges,
            );
        }

        if let Some(order) = &stats.order {
            out.push_str(&format!(
                "  {}  (n={} runs with a winner)\n",
                self.style.bold("SPEAKING ORDER"),
                order.n
            ));
            out.push_str(&format!(
                "  First speaker:   {} wins  ({})\n",
                order.first_wins,
                percent(Some(order.first_win_rate))
            ));
            out.push_str(&format!(
                "  Second speaker:  {} wins  ({})\n\n",
                order.second_wins,
                percent(Some(order.second_win_rate))
            ));
        }

        if stats.sides.n > 0 {
            let sides = &stats.sides;
            out.push_str(&format!(
                "  {}  (n={} runs with a winner)\n",
                self.style.bold("SIDE EFFECT"),
                sides.n
            ));
            out.push_str(&format!(
                "  FOR:     {} wins  ({})\n",
                sides.for_wins,
                percent(sides.for_win_rate)
            ));
            out.push_str(&format!(
                "  AGAINST: {} wins  ({})\n\n",
                sides.against_wins,
                percent(sides.against_win_rate)
            ));
        }

        out.push_str(&format!("{}\n", rule));
        out
    }
}
