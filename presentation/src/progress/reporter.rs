//! Progress reporting for batch execution

use crate::output::style::Style;
use debate_application::{BatchObserver, Lineup, RunDebateError};
use debate_domain::RunRecord;

/// Prints a banner before each run and a one-line result after it
pub struct BatchProgress {
    style: Style,
    quiet: bool,
}

impl BatchProgress {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self {
            style: Style::new(color),
            quiet,
        }
    }

    pub fn run_banner(&self, run_num: usize, total: usize, lineup: &Lineup) -> String {
        let rule = "=".repeat(60);
        let mut cast = format!("{} vs {}", lineup.opener.name, lineup.responder.name);
        if let Some(judge) = &lineup.judge {
            cast.push_str(&format!(", judged by {}", judge.name));
        }
        format!(
            "\n{}\n  {}  {}\n{}\n",
            self.style.bold(&rule),
            self.style.bold(&format!("RUN {} of {}", run_num, total)),
            self.style.dimmed(&cast),
            self.style.bold(&rule)
        )
    }

    pub fn run_summary(&self, record: &RunRecord) -> String {
        let winner = match &record.winner {
            Some(winner) => format!("winner {}", self.style.bold(winner)),
            None => "no verdict".to_string(),
        };
        let premise = match record.premise_upheld {
            Some(true) => format!(", premise {}", self.style.paint_bold("UPHELD", "green")),
            Some(false) => format!(", premise {}", self.style.paint_bold("REJECTED", "red")),
            None => String::new(),
        };
        format!(
            "{} Run {}: {}{}",
            self.style.paint("v", "green"),
            record.run_num,
            winner,
            premise
        )
    }
}

impl BatchObserver for BatchProgress {
    fn on_run_start(&self, run_num: usize, total: usize, lineup: &Lineup) {
        if !self.quiet {
            println!("{}", self.run_banner(run_num, total, lineup));
        }
    }

    fn on_run_complete(&self, record: &RunRecord) {
        println!("{}", self.run_summary(record));
    }

    fn on_run_failed(&self, run_num: usize, error: &RunDebateError) {
        println!(
            "{} Run {} failed: {}",
            self.style.paint("x", "red"),
            run_num,
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::Persona;

    #[test]
    fn test_run_banner() {
        let lineup = Lineup::new(Persona::new("Ada", "m"), Persona::new("Brook", "m"))
            .with_judge(Persona::new("Morgan", "m"));
        let banner = BatchProgress::new(false, false).run_banner(2, 5, &lineup);
        assert!(banner.contains("RUN 2 of 5  Ada vs Brook, judged by Morgan"));
        assert_eq!(banner.matches(&"=".repeat(60)).count(), 2);
    }

    #[test]
    fn test_run_summary() {
        let progress = BatchProgress::new(false, true);
        let record = RunRecord {
            run_num: 3,
            winner: Some("Ada".to_string()),
            premise_upheld: Some(false),
            ..Default::default()
        };
        assert_eq!(progress.run_summary(&record), "v Run 3: winner Ada, premise REJECTED");

        let unjudged = RunRecord {
            run_num: 4,
            ..Default::default()
        };
        assert_eq!(progress.run_summary(&unjudged), "v Run 4: no verdict");
    }
}
