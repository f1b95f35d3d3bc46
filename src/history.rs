//! History and error logs kept per command prefix.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Characters that are not allowed in file names on common platforms.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid regex"));

/// Build a file name stem from a command prefix.
///
/// The prefix words are joined with spaces and every disallowed character is
/// replaced with `_`.
pub fn log_stem(prefix: &[String]) -> String {
    let joined = prefix.join(" ");
    DISALLOWED.replace_all(&joined, "_").into_owned()
}

/// An append-only log with one line per entry.
#[derive(Debug, Clone)]
pub struct LineLog {
    path: PathBuf,
}

impl LineLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` followed by a newline, creating the file if needed.
    pub fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()
    }
}

/// The pair of logs kept for one command prefix.
#[derive(Debug, Clone)]
pub struct SessionLogs {
    /// Accepted prompt lines.
    pub history: LineLog,
    /// Prompt lines on which some command failed.
    pub errors: LineLog,
}

impl SessionLogs {
    /// Logs for `prefix` inside `dir`.
    pub fn new(dir: &Path, prefix: &[String]) -> Self {
        let stem = log_stem(prefix);
        Self {
            history: LineLog::new(dir.join(format!("{}.history", stem))),
            errors: LineLog::new(dir.join(format!("{}.errors", stem))),
        }
    }
}
