//! JSONL file writer for attempt records.
//!
//! Each [`AttemptRecord`] is serialized as a single JSON line with a
//! `timestamp` field, appended to the file via a buffered writer.

use cascade_application::ports::attempt_logger::{AttemptLogger, AttemptRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL attempt logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`, so concurrent sessions can share
/// one instance. Flushes after every record and on `Drop`.
pub struct JsonlAttemptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAttemptLogger {
    /// Open `path` for appending, creating it (and parent directories) if needed.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
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
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AttemptLogger for JsonlAttemptLogger {
    fn log(&self, record: &AttemptRecord) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not serialize attempt record: {}", e);
                return;
            }
        };
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        let Ok(line) = serde_json::to_string(&value) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write attempt log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlAttemptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_domain::{OutcomeKind, ProviderKind, Tier};

    fn record(attempt: usize, tier: u8, outcome: OutcomeKind) -> AttemptRecord {
        AttemptRecord {
            task_id: "task-1".to_string(),
            attempt,
            tier: Tier::new(tier).unwrap(),
            provider: ProviderKind::Groq,
            model: "llama-3.1-8b-instant".to_string(),
            outcome,
            rate_limited: false,
            reason: None,
            elapsed_ms: 12,
            cooldown_ms: 0,
        }
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts.jsonl");
        let logger = JsonlAttemptLogger::new(&path).unwrap();

        logger.log(&record(1, 1, OutcomeKind::Deferred));
        let mut failed = record(2, 2, OutcomeKind::Failed);
        failed.rate_limited = true;
        failed.reason = Some("HTTP 429".to_string());
        logger.log(&failed);
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["task_id"], "task-1");
        assert_eq!(first["tier"], 1);
        assert_eq!(first["provider"], "groq");
        assert_eq!(first["outcome"], "deferred");
        assert!(first.get("reason").is_none());
        assert!(first["timestamp"].as_str().unwrap().ends_with('Z'));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"], "failed");
        assert_eq!(second["rate_limited"], true);
        assert_eq!(second["reason"], "HTTP 429");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("attempts.jsonl");

        let logger = JsonlAttemptLogger::new(&path).unwrap();
        logger.log(&record(1, 3, OutcomeKind::Failed));
        drop(logger);

        let logger = JsonlAttemptLogger::new(&path).unwrap();
        logger.log(&record(1, 4, OutcomeKind::Completed));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
