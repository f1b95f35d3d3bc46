//! The interactive prompt loop.

use log::{debug, warn};
use rustyline::error::ReadlineError;
use std::io::{self, Write};
use thiserror::Error;

use crate::executor::Executor;
use crate::history::{LineLog, SessionLogs};
use crate::input::LineSource;
use crate::shell::Dispatcher;

/// Exit status of the process after a fatal session error.
pub const FATAL_EXIT: u8 = 128;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read input: {0}")]
    Readline(#[from] ReadlineError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Build the prompt shown for a command prefix, e.g. `git commit> `.
///
/// The words are joined by single spaces, so a command without prefix
/// arguments gets no trailing space before `>` (`ls> `, not `ls > `).
pub fn prompt(prefix: &[String]) -> String {
    format!("{}> ", prefix.join(" "))
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Non-empty lines processed.
    pub lines: usize,
    /// Lines on which at least one command failed.
    pub failed_lines: usize,
    /// Commands run across all lines.
    pub dispatched: usize,
}

/// Reads prompt lines and runs them until input ends.
pub struct Session<S, E, W> {
    source: S,
    dispatcher: Dispatcher<E, W>,
    logs: SessionLogs,
    prompt: String,
}

impl<S: LineSource, E: Executor, W: Write> Session<S, E, W> {
    pub fn new(source: S, dispatcher: Dispatcher<E, W>, logs: SessionLogs) -> Self {
        let prompt = prompt(dispatcher.prefix());
        Self {
            source,
            dispatcher,
            logs,
            prompt,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn dispatcher(&self) -> &Dispatcher<E, W> {
        &self.dispatcher
    }

    /// Run until the source reports end of input.
    pub fn run(&mut self) -> Result<SessionStats, SessionError> {
        let mut stats = SessionStats::default();

        while let Some(line) = self.source.read_line(&self.prompt)? {
            if line.is_empty() {
                continue;
            }
            stats.lines += 1;

            // lines starting with a space stay out of history
            if !line.starts_with(' ') {
                self.source.remember(&line);
                append_or_warn(&self.logs.history, &line);
            }

            let outcome = self.dispatcher.run_line(&line)?;
            stats.dispatched += outcome.dispatched;
            debug!("line done: {:?}", outcome);

            if outcome.failed {
                stats.failed_lines += 1;
                append_or_warn(&self.logs.errors, &line);
            }
        }

        Ok(stats)
    }
}

fn append_or_warn(log: &LineLog, line: &str) {
    if let Err(e) = log.append(line) {
        warn!("failed to write {}: {}", log.path().display(), e);
    }
}
