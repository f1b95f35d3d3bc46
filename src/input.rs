//! Sources of prompt lines.

use log::{debug, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::Path;

/// Something that hands out one prompt line at a time.
pub trait LineSource {
    /// Show `prompt` and read the next line, without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError>;

    /// Make `line` available for recall in later prompts.
    fn remember(&mut self, _line: &str) {}
}

/// Interactive line editor backed by rustyline.
pub struct Editor {
    rl: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            rl: DefaultEditor::new()?,
        })
    }

    /// Preload recall history from a file written by earlier sessions.
    ///
    /// A missing or unreadable file is ignored.
    pub fn load_history(&mut self, path: &Path) {
        if let Err(e) = self.rl.load_history(path) {
            debug!("no history loaded from {}: {}", path.display(), e);
        }
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError> {
        loop {
            match self.rl.readline(prompt) {
                Ok(line) => return Ok(Some(line)),
                // Ctrl-C drops the partial line and prompts again
                Err(ReadlineError::Interrupted) => continue,
                // a line that is not UTF-8 is dropped on its own
                Err(ReadlineError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                    warn!("skipping input line: {}", e);
                    continue;
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.rl.add_history_entry(line) {
            debug!("failed to add history entry: {}", e);
        }
    }
}

/// Fixed list of lines, for tests and non-interactive use.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    remembered: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Lines passed to [`LineSource::remember`].
    pub fn remembered(&self) -> &[String] {
        &self.remembered
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn remember(&mut self, line: &str) {
        self.remembered.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_order() {
        let mut input = ScriptedInput::new(["a", "b"]);
        assert_eq!(input.read_line("> ").unwrap(), Some("a".to_string()));
        assert_eq!(input.read_line("> ").unwrap(), Some("b".to_string()));
        assert_eq!(input.read_line("> ").unwrap(), None);
        assert_eq!(input.prompts().len(), 3);
    }

    #[test]
    fn test_scripted_input_remember() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        input.remember("x");
        assert_eq!(input.remembered(), ["x".to_string()]);
    }
}
