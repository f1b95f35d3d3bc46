//! Prompt line parsing and dispatch.

mod dispatch;
mod state;
mod tokenizer;

pub use dispatch::{Dispatcher, LineOutcome};
pub use state::{COMMENT, ESCAPABLE, ESCAPE, Quote, Resume, SEPARATOR, State};
pub use tokenizer::{Tokenizer, split_line};
