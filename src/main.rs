//! prefix-loop - prompt for arguments and run them after a fixed command.

use prefix_loop::audit::Audited;
use prefix_loop::config::Config;
use prefix_loop::executor::{Executor, ProcessExecutor};
use prefix_loop::history::SessionLogs;
use prefix_loop::input::Editor;
use prefix_loop::session::{FATAL_EXIT, Session};
use prefix_loop::shell::Dispatcher;

use clap::Parser;
use log::{debug, warn};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a command repeatedly, taking its trailing arguments from a prompt.
///
/// Separate several invocations on one line with `;`. Quote with `'` or `"`,
/// escape with `\`, and start a comment with `#`.
#[derive(Debug, Parser)]
#[command(name = "prefix-loop", version)]
struct Cli {
    /// Directory for the history and error logs.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// The command followed by the arguments placed before every prompt line.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    prefix: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Load config
    let cwd = std::env::current_dir().ok();
    let config = match Config::load(cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            Config::default()
        }
    };

    let log_dir = cli.log_dir.unwrap_or_else(|| config.log_dir());
    let logs = SessionLogs::new(&log_dir, &cli.prefix);
    debug!("history in {}", logs.history.path().display());

    let mut editor = match Editor::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("prefix-loop: {}", e);
            return ExitCode::from(FATAL_EXIT);
        }
    };
    if config.load_history() {
        editor.load_history(logs.history.path());
    }

    let executor: Box<dyn Executor> = match config.audit_path() {
        Some(path) => match Audited::open(ProcessExecutor, path) {
            Ok(audited) => Box::new(audited),
            Err(e) => {
                warn!("audit log {} unavailable: {}", path.display(), e);
                Box::new(ProcessExecutor)
            }
        },
        None => Box::new(ProcessExecutor),
    };

    let dispatcher = Dispatcher::new(cli.prefix, executor, io::stdout(), config.divider());
    let mut session = Session::new(editor, dispatcher, logs);

    match session.run() {
        Ok(stats) => {
            debug!("session finished: {:?}", stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("prefix-loop: {}", e);
            ExitCode::from(FATAL_EXIT)
        }
    }
}
