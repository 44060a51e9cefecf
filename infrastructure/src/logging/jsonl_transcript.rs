//! JSONL file writer for debate events.
//!
//! Each [`DebateEvent`] is serialized as a single JSON line carrying its
//! `type`, `speaker`, `content`, `color`, optional `metadata` and a
//! `timestamp`, appended to the file via a buffered writer.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use debate_application::{DebateListener, ListenerError};
use debate_domain::DebateEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// `<dir>/<stem>_<YYYYmmdd_HHMMSS>.jsonl`, with a `_runNNN` suffix in batch mode.
pub fn transcript_path(
    dir: &Path,
    stem: &str,
    started: DateTime<Local>,
    run: Option<usize>,
) -> PathBuf {
    let timestamp = started.format("%Y%m%d_%H%M%S");
    let name = match run {
        Some(run) => format!("{}_{}_run{:03}.jsonl", stem, timestamp, run),
        None => format!("{}_{}.jsonl", stem, timestamp),
    };
    dir.join(name)
}

/// Debate listener that writes one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and on `Drop`.
pub struct JsonlTranscriptWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptWriter {
    /// Create the transcript file, and its parent directories if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ListenerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        debug!("Writing transcript to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DebateListener for JsonlTranscriptWriter {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        let mut record = serde_json::to_value(event)?;
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        let line = serde_json::to_string(&record)?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ListenerError::Other("transcript writer poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlTranscriptWriter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use debate_domain::EventMetadata;
    use std::collections::BTreeMap;

    #[test]
    fn test_transcript_path_format() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let dir = Path::new("results");
        assert_eq!(
            transcript_path(dir, "cars", started, None),
            PathBuf::from("results/cars_20240309_140507.jsonl")
        );
        assert_eq!(
            transcript_path(dir, "cars", started, Some(12)),
            PathBuf::from("results/cars_20240309_140507_run012.jsonl")
        );
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("debate.jsonl");
        let writer = JsonlTranscriptWriter::create(&path).unwrap();
        assert_eq!(writer.path(), path.as_path());

        writer
            .on_event(&DebateEvent::new(EventMetadata::Turn, "Ada", "Hello.", "cyan"))
            .unwrap();
        writer
            .on_event(&DebateEvent::new(
                EventMetadata::Verdict {
                    winner: Some("Ada".to_string()),
                    scores: BTreeMap::from([("Ada".to_string(), 8), ("Brook".to_string(), 6)]),
                    premise: None,
                    premise_upheld: None,
                },
                "Morgan",
                "Ada wins.",
                "yellow",
            ))
            .unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["type"], "TURN");
        assert_eq!(lines[0]["speaker"], "Ada");
        assert!(lines[0].get("metadata").is_none());
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));

        assert_eq!(lines[1]["type"], "VERDICT");
        assert_eq!(lines[1]["metadata"]["winner"], "Ada");
        assert_eq!(lines[1]["metadata"]["scores"]["Brook"], 6);
    }

    #[test]
    fn test_create_fails_on_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            JsonlTranscriptWriter::create(dir.path()),
            Err(ListenerError::Io(_))
        ));
    }
}
