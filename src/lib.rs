//! prefix-loop - run a command repeatedly with arguments typed at a prompt.
//!
//! Every prompt line is split into sub-lines on `;` and each sub-line into
//! arguments. Each argument list is appended to a fixed command prefix and
//! run before the rest of the line is parsed. Quotes, backslash escapes and
//! `#` comments are supported.

pub mod audit;
pub mod config;
pub mod executor;
pub mod history;
pub mod input;
pub mod session;
pub mod shell;

pub use config::Config;
pub use executor::{Executor, ProcessExecutor, RecordingExecutor};
pub use history::SessionLogs;
pub use session::{Session, SessionError};
pub use shell::{Dispatcher, LineOutcome, split_line};
