//! Running every sub-line of a prompt line.

use log::debug;
use std::io::{self, Write};

use super::tokenizer::Tokenizer;
use crate::executor::Executor;

/// What happened while running one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineOutcome {
    /// Number of commands that were run.
    pub dispatched: usize,
    /// Set once any command on the line exited with a nonzero status.
    pub failed: bool,
}

/// Runs the argument lists produced by the tokenizer against a fixed prefix.
pub struct Dispatcher<E, W> {
    prefix: Vec<String>,
    executor: E,
    output: W,
    divider: String,
}

impl<E: Executor, W: Write> Dispatcher<E, W> {
    /// Create a dispatcher that runs `prefix` plus each argument list.
    ///
    /// `divider` is written to `output` as one line after every command.
    pub fn new(prefix: Vec<String>, executor: E, output: W, divider: impl Into<String>) -> Self {
        Self {
            prefix,
            executor,
            output,
            divider: divider.into(),
        }
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Tokenize `line` and run each sub-line as soon as it is complete.
    ///
    /// Commands run left to right; a failure does not stop later ones.
    pub fn run_line(&mut self, line: &str) -> io::Result<LineOutcome> {
        let mut outcome = LineOutcome::default();
        let mut tokenizer = Tokenizer::new();

        for c in line.chars() {
            if let Some(args) = tokenizer.feed(c) {
                self.dispatch(&args, &mut outcome)?;
            }
        }
        if let Some(args) = tokenizer.finish() {
            self.dispatch(&args, &mut outcome)?;
        }

        Ok(outcome)
    }

    fn dispatch(&mut self, args: &[String], outcome: &mut LineOutcome) -> io::Result<()> {
        debug!("dispatch {:?} {:?}", self.prefix, args);
        let status = self.executor.execute(&self.prefix, args);
        debug!("exit status {}", status);

        outcome.dispatched += 1;
        if status > 0 {
            outcome.failed = true;
        }

        writeln!(self.output, "{}", self.divider)?;
        self.output.flush()
    }
}
