//! Append-only game event log
//!
//! Writes one JSON object per line. The log is optional and write failures
//! are only reported through `tracing`; game behaviour never depends on it.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::error::AppError;

/// A single log record
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LogEvent {
    /// Session registered with its first answer
    Created { session_id: String, answer: String },
    /// Guess recorded against the current answer
    Guessed {
        session_id: String,
        guess: String,
        answer: String,
    },
    /// New round started in an existing session
    Reset {
        session_id: String,
        answer: String,
        reset: bool,
    },
    /// Guest removed from a session
    Removed {
        removing: String,
        from: String,
        clients: usize,
    },
}

/// JSON Lines file sink
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl EventLog {
    /// Create (or truncate) the log file, creating parent directories
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, flushing immediately
    pub fn record(&mut self, event: &LogEvent) {
        if let Err(e) = self.write_line(event) {
            warn!("Failed to write event log {}: {}", self.path.display(), e);
        }
    }

    fn write_line(&mut self, event: &LogEvent) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_json_lines() {
        let path = std::env::temp_dir()
            .join(format!("wordle-log-{}", uuid::Uuid::new_v4()))
            .join("events.jsonl");
        let mut log = EventLog::create(&path).unwrap();

        log.record(&LogEvent::Created {
            session_id: "apple-crane".to_string(),
            answer: "slate".to_string(),
        });
        log.record(&LogEvent::Removed {
            removing: "ada".to_string(),
            from: "apple-crane".to_string(),
            clients: 3,
        });

        let text = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"session_id":"apple-crane","answer":"slate"}"#);
        assert_eq!(
            lines[1],
            r#"{"removing":"ada","from":"apple-crane","clients":3}"#
        );

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
