//! Running the prefixed command.

use log::{debug, warn};
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::process::{Command, ExitStatus};

/// Status reported when the program does not exist.
pub const STATUS_NOT_FOUND: i32 = 127;
/// Status reported when the program exists but cannot be run.
pub const STATUS_NOT_EXECUTABLE: i32 = 126;

/// Runs one command made of a fixed prefix and per-dispatch arguments.
///
/// Implementations block until the command finishes and report only its
/// exit status. Output is not captured.
pub trait Executor {
    /// Run `prefix` followed by `args` and return the exit status.
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32 {
        (**self).execute(prefix, args)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32 {
        (**self).execute(prefix, args)
    }
}

/// Spawns the command as a child process that inherits stdio.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32 {
        let argv: Vec<&String> = prefix.iter().chain(args).collect();
        let Some((program, rest)) = argv.split_first() else {
            warn!("nothing to execute");
            return STATUS_NOT_FOUND;
        };

        debug!("spawning {:?}", argv);
        match Command::new(program).args(rest).status() {
            Ok(status) => status_code(status),
            Err(e) => {
                eprintln!("prefix-loop: {}: {}", program, e);
                match e.kind() {
                    ErrorKind::NotFound => STATUS_NOT_FOUND,
                    ErrorKind::PermissionDenied => STATUS_NOT_EXECUTABLE,
                    _ => 1,
                }
            }
        }
    }
}

/// Exit code of a finished child; signals map to 128 + signal number.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// One recorded call to [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub prefix: Vec<String>,
    pub args: Vec<String>,
}

/// Executor that records calls instead of spawning processes.
///
/// Statuses are handed out in order from a script; once the script runs out
/// every call succeeds.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Vec<Call>,
    statuses: VecDeque<i32>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these statuses, in order, from the next calls.
    pub fn with_statuses(statuses: impl IntoIterator<Item = i32>) -> Self {
        Self {
            calls: Vec::new(),
            statuses: statuses.into_iter().collect(),
        }
    }

    /// All recorded calls.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// The argument lists of all recorded calls, without the prefix.
    pub fn arg_lists(&self) -> Vec<Vec<String>> {
        self.calls.iter().map(|c| c.args.clone()).collect()
    }
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, prefix: &[String], args: &[String]) -> i32 {
        self.calls.push(Call {
            prefix: prefix.to_vec(),
            args: args.to_vec(),
        });
        self.statuses.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_recording_executor_records_calls() {
        let mut exec = RecordingExecutor::new();
        let status = exec.execute(&strings(&["git"]), &strings(&["status"]));
        assert_eq!(status, 0);
        assert_eq!(exec.calls().len(), 1);
        assert_eq!(exec.calls()[0].prefix, vec!["git"]);
        assert_eq!(exec.arg_lists(), vec![vec!["status"]]);
    }

    #[test]
    fn test_recording_executor_scripted_statuses() {
        let mut exec = RecordingExecutor::with_statuses([3, 0]);
        assert_eq!(exec.execute(&[], &[]), 3);
        assert_eq!(exec.execute(&[], &[]), 0);
        assert_eq!(exec.execute(&[], &[]), 0);
    }

    #[test]
    fn test_executor_through_mut_ref() {
        fn run<E: Executor>(mut exec: E) -> i32 {
            exec.execute(&[], &strings(&["x"]))
        }
        let mut exec = RecordingExecutor::with_statuses([5]);
        assert_eq!(run(&mut exec), 5);
        assert_eq!(exec.calls().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_executor_exit_codes() {
        let mut exec = ProcessExecutor;
        assert_eq!(exec.execute(&strings(&["true"]), &[]), 0);
        assert_eq!(exec.execute(&strings(&["false"]), &[]), 1);
        assert_eq!(
            exec.execute(&strings(&["sh", "-c"]), &strings(&["exit 7"])),
            7
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_process_executor_argv_split_anywhere() {
        let mut exec = ProcessExecutor;
        assert_eq!(exec.execute(&strings(&["sh", "-c", "exit 5"]), &[]), 5);
        assert_eq!(exec.execute(&strings(&["sh"]), &strings(&["-c", "exit 6"])), 6);
    }

    #[test]
    fn test_process_executor_missing_program() {
        let mut exec = ProcessExecutor;
        let status = exec.execute(&strings(&["prefix-loop-no-such-program"]), &[]);
        assert_eq!(status, STATUS_NOT_FOUND);
    }

    #[test]
    fn test_process_executor_empty_argv() {
        let mut exec = ProcessExecutor;
        assert_eq!(exec.execute(&[], &[]), STATUS_NOT_FOUND);
    }
}
