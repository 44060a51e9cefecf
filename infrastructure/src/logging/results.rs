//! JSONL file of per-run batch results.
//!
//! One line per completed run: the [`RunRecord`] fields plus the winner's
//! side, both sided scores and the run's transcript file name. Lines are
//! flushed as runs finish, so a batch cut short keeps its completed rows.

use chrono::{DateTime, Local};
use debate_application::ListenerError;
use debate_domain::{RunRecord, Side};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// `<dir>/<stem>_summary_<YYYYmmdd_HHMMSS>.jsonl`
pub fn results_path(dir: &Path, stem: &str, started: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "{}_summary_{}.jsonl",
        stem,
        started.format("%Y%m%d_%H%M%S")
    ))
}

#[derive(Serialize)]
struct ResultLine<'a> {
    #[serde(flatten)]
    record: &'a RunRecord,
    winner_side: Option<Side>,
    score_for: Option<u8>,
    score_against: Option<u8>,
    transcript_filename: Option<&'a str>,
}

impl<'a> ResultLine<'a> {
    fn new(record: &'a RunRecord, transcript: Option<&'a Path>) -> Self {
        let score = |name: &Option<String>| name.as_deref().and_then(|n| record.score_of(n));
        Self {
            record,
            winner_side: record.winner_side(),
            score_for: score(&record.agent_for),
            score_against: score(&record.agent_against),
            // Transcripts sit next to the results file
            transcript_filename: transcript
                .and_then(|path| path.file_name())
                .and_then(|name| name.to_str()),
        }
    }
}

/// Appends one JSON object per finished run.
pub struct BatchResultsWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl BatchResultsWriter {
    /// Create the results file, and its parent directories if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ListenerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        debug!("Writing batch results to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(
        &self,
        record: &RunRecord,
        transcript: Option<&Path>,
    ) -> Result<(), ListenerError> {
        let line = serde_json::to_string(&ResultLine::new(record, transcript))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ListenerError::Other("results writer poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sided_record() -> RunRecord {
        RunRecord {
            run_num: 2,
            debaters: vec!["Brook".to_string(), "Ada".to_string()],
            models: BTreeMap::from([
                ("Ada".to_string(), "llama3".to_string()),
                ("Brook".to_string(), "qwen2".to_string()),
            ]),
            agent_for: Some("Ada".to_string()),
            model_for: Some("llama3".to_string()),
            agent_against: Some("Brook".to_string()),
            model_against: Some("qwen2".to_string()),
            judge: Some("Judy".to_string()),
            model_judge: Some("gemma2".to_string()),
            first_speaker: Some("Brook".to_string()),
            premise: Some("Cars should be banned".to_string()),
            premise_upheld: Some(false),
            winner: Some("Brook".to_string()),
            scores: BTreeMap::from([("Ada".to_string(), 5), ("Brook".to_string(), 8)]),
        }
    }

    #[test]
    fn test_results_path_format() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            results_path(Path::new("results"), "cars", started),
            PathBuf::from("results/cars_summary_20240309_140507.jsonl")
        );
    }

    #[test]
    fn test_appends_one_line_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cars_summary.jsonl");
        let writer = BatchResultsWriter::create(&path).unwrap();
        assert_eq!(writer.path(), path.as_path());

        let transcript = dir.path().join("out").join("cars_20240309_140507_run002.jsonl");
        writer
            .append(&sided_record(), Some(transcript.as_path()))
            .unwrap();
        writer
            .append(
                &RunRecord {
                    run_num: 3,
                    debaters: vec!["Ada".to_string(), "Brook".to_string()],
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        let first = &lines[0];
        assert_eq!(first["run_num"], 2);
        assert_eq!(first["agent_for"], "Ada");
        assert_eq!(first["model_against"], "qwen2");
        assert_eq!(first["judge"], "Judy");
        assert_eq!(first["first_speaker"], "Brook");
        assert_eq!(first["premise_upheld"], false);
        assert_eq!(first["winner"], "Brook");
        assert_eq!(first["winner_side"], "against");
        assert_eq!(first["score_for"], 5);
        assert_eq!(first["score_against"], 8);
        assert_eq!(first["transcript_filename"], "cars_20240309_140507_run002.jsonl");

        let second = &lines[1];
        assert_eq!(second["run_num"], 3);
        assert_eq!(second["debaters"][1], "Brook");
        assert!(second["winner_side"].is_null());
        assert!(second["score_for"].is_null());
        assert!(second["transcript_filename"].is_null());
    }

    #[test]
    fn test_rows_deserialize_back_into_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.jsonl");
        let writer = BatchResultsWriter::create(&path).unwrap();
        writer.append(&sided_record(), None).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        let record: RunRecord = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(record, sided_record());
    }
}
