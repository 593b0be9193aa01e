//! Audit log
//!
//! Appends one JSON line per command outcome for later review.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Entry in the audit log
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub command: &'static str,
    pub strategy: String,
    pub status: &'static str,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl AuditEntry {
    /// Entry for a finished command
    pub fn from_outcome<T: Serialize>(
        command: &'static str,
        strategy: &str,
        outcome: &crate::Result<T>,
    ) -> Self {
        let (status, result, error) = match outcome {
            Ok(value) => match serde_json::to_value(value) {
                Ok(value) => ("ok", Some(value), None),
                Err(e) => ("ok", None, Some(format!("Unserializable result: {}", e))),
            },
            Err(e) => ("error", None, Some(e.to_string())),
        };

        Self {
            timestamp: Utc::now(),
            command,
            strategy: strategy.to_string(),
            status,
            result,
            error,
        }
    }
}

/// JSONL writer for audit entries
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}
