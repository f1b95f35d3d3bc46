//! Audit logging of dispatched commands.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::executor::Executor;

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// When the command finished.
    pub timestamp: DateTime<Utc>,
    /// Full argument vector, prefix included.
    pub argv: Vec<String>,
    /// Exit status reported by the executor.
    pub status: i32,
    /// Whether the status counts as a failure.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl AuditEntry {
    /// Create a new audit entry for a finished command.
    pub fn new(prefix: &[String], args: &[String], status: i32) -> Self {
        Self {
            timestamp: Utc::now(),
            argv: prefix.iter().chain(args).cloned().collect(),
            status,
            failed: status > 0,
        }
    }
}

/// Executor wrapper that appends every finished command to a JSON-lines log.
pub struct Audited<E> {
    inner: E,
    file: File,
}

impl<E> Audited<E> {
    /// Wrap `inner`, appending to the log at `path` (created if missing).
    pub fn open(inner: E, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { inner, file })
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn record(&mut self, entry: &AuditEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.file, entry)?;
        self.file.write_all(b"\n")?;
        self.file.flush()
    }
}

impl<E: Executor> Executor for Audited<E> {
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32 {
        let status = self.inner.execute(prefix, args);
        let entry = AuditEntry::new(prefix, args, status);
        if let Err(e) = self.record(&entry) {
            warn!("failed to write audit entry: {}", e);
        }
        status
    }
}
