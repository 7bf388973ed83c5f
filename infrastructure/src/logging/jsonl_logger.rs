//! JSONL writer for [`ConversationEvent`]s.
//!
//! Every line is one JSON object: the event payload's fields plus `type`,
//! `timestamp`, `run` and `seq`. The file is opened in append mode so
//! several runs can share one log; `run` tells them apart.

use parley_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
    seq: AtomicU64,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
            seq: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        map.insert("run".to_string(), Value::from(self.run_id.as_str()));
        map.insert("seq".to_string(), Value::from(seq));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlTranscriptLogger {
    fn log(&self, event: ConversationEvent) {
        let event_type = event.event_type;
        let line = match serde_json::to_string(&self.record(event)) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not serialize {} event: {}", event_type, e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write transcript log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_application::ports::conversation_logger::event_types;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_payload_fields_merged_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("parley.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            event_types::CONTRACT_DECISION,
            serde_json::json!({ "mode": "clarify", "stakes": "high" }),
        ));
        logger.log(ConversationEvent::new(
            event_types::PEER_RESULT,
            serde_json::json!({ "agent": "advisor-a", "live": true }),
        ));
        let run_id = logger.run_id().to_string();
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "contract_decision");
        assert_eq!(records[0]["mode"], "clarify");
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[1]["type"], "peer_result");
        assert_eq!(records[1]["seq"], 1);
        for record in &records {
            assert_eq!(record["run"], run_id.as_str());
            assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        }
    }

    #[test]
    fn test_non_object_payload_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            event_types::FALLBACK,
            Value::from("missing_api_key"),
        ));
        logger.log(ConversationEvent::new(event_types::TRUST_GATE, Value::Null));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "missing_api_key");
        assert!(records[1].get("data").is_none());
        assert_eq!(records[1]["type"], "trust_gate");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");

        for _ in 0..2 {
            let logger = JsonlTranscriptLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new(
                event_types::EVIDENCE_FETCHED,
                serde_json::json!({ "ok": false }),
            ));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlTranscriptLogger::open(blocker.join("t.jsonl")).is_err());
    }
}
