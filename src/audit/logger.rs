//! Append-only JSONL audit log
//!
//! One JSON object per line. Appends go out in a single write so concurrent
//! CLI invocations never interleave inside a line. A final line without its
//! newline is what an interrupted append leaves behind; readers drop it.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{PennywiseError, PennywiseResult};

use super::entry::AuditEntry;

/// Writer and reader for one user's `audit.log`
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> PennywiseResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| PennywiseError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| {
                PennywiseError::Io(format!(
                    "Failed to append to {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        tracing::trace!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "audit entry written"
        );
        Ok(())
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> PennywiseResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.scan(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> PennywiseResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count.min(256));
        self.scan(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    fn scan(&self, mut visit: impl FnMut(AuditEntry)) -> PennywiseResult<()> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(PennywiseError::Io(format!(
                    "Failed to read {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        let complete = contents.ends_with('\n');
        let lines: Vec<&str> = contents.lines().collect();
        let last = lines.len().saturating_sub(1);

        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => visit(entry),
                Err(e) if index == last && !complete => {
                    tracing::warn!(line = index + 1, error = %e, "skipping truncated audit entry");
                }
                Err(e) => {
                    return Err(PennywiseError::Json(format!(
                        "Failed to parse audit entry at line {}: {}",
                        index + 1,
                        e
                    )))
                }
            }
        }
        Ok(())
    }
}
