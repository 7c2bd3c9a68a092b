//! JSONL call journal.
//!
//! Every client call can be recorded here: a bounded in-memory ring buffer
//! mirrored to an append-only file, one JSON object per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub timestamp: DateTime<Utc>,
    pub provider: String,
    pub operation: String,
    pub outcome: Outcome,
    pub message: String,
    /// Endpoint and model the call went to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl CallRecord {
    pub fn new(
        provider: impl Into<String>,
        operation: impl Into<String>,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            provider: provider.into(),
            operation: operation.into(),
            outcome,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, ctx: serde_json::Value) -> Self {
        self.context = Some(ctx);
        self
    }
}

pub struct CallLog {
    entries: VecDeque<CallRecord>,
    writer: BufWriter<File>,
}

impl CallLog {
    /// Open (or create) the journal, replaying existing lines into memory.
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut entries = VecDeque::with_capacity(MAX_LOG_ENTRIES);

        if file_path.exists() {
            let reader = BufReader::new(File::open(&file_path)?);
            for line in reader.lines().map_while(std::result::Result::ok) {
                if let Ok(entry) = serde_json::from_str::<CallRecord>(&line) {
                    if entries.len() >= MAX_LOG_ENTRIES {
                        entries.pop_front();
                    }
                    entries.push_back(entry);
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        Ok(Self {
            entries,
            writer: BufWriter::new(file),
        })
    }

    pub fn record(&mut self, entry: CallRecord) {
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = writeln!(self.writer, "{json}");
            let _ = self.writer.flush();
        }
        if self.entries.len() >= MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<CallRecord> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }
}

/// Cloneable handle to a [`CallLog`], safe to hand to several clients.
#[derive(Clone)]
pub struct SharedCallLog(Arc<Mutex<CallLog>>);

impl SharedCallLog {
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self(Arc::new(Mutex::new(CallLog::new(file_path)?))))
    }

    pub fn record(&self, entry: CallRecord) {
        if let Ok(mut log) = self.0.lock() {
            log.record(entry);
        }
    }

    pub fn recent(&self, limit: usize) -> Vec<CallRecord> {
        self.0.lock().map(|l| l.recent(limit)).unwrap_or_default()
    }
}

impl std::fmt::Debug for SharedCallLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCallLog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("calls.jsonl");

        let log = SharedCallLog::new(&path).unwrap();
        log.record(CallRecord::new("deepl", "translate", Outcome::Ok, "1 text"));
        log.record(
            CallRecord::new("openai", "generate", Outcome::Failed, "status 401")
                .with_context(serde_json::json!({ "model": "gpt-4o-mini" })),
        );
        drop(log);

        let reopened = CallLog::new(&path).unwrap();
        let recent = reopened.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].provider, "openai");
        assert_eq!(recent[0].outcome, Outcome::Failed);
        assert_eq!(recent[0].context, Some(serde_json::json!({ "model": "gpt-4o-mini" })));
        assert_eq!(recent[1].operation, "translate");
        assert!(recent[1].context.is_none());
    }

    #[test]
    fn test_missing_context_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.jsonl");

        let mut log = CallLog::new(&path).unwrap();
        log.record(CallRecord::new("anthropic", "generate", Outcome::Ok, "done"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("context"));
    }
}
