//! Character-level tokenizer for prompt lines.
//!
//! A line is split into sub-lines on unquoted, unescaped `;`. Each sub-line is
//! split into arguments on spaces. Quotes group text, `#` starts a comment that
//! runs until the next separator, and `\` makes the next special character
//! literal.

use super::state::{COMMENT, ESCAPABLE, ESCAPE, Quote, Resume, SEPARATOR, State};

/// Incremental tokenizer for a single line.
///
/// Feed characters with [`Tokenizer::feed`]; every time a sub-line completes
/// its argument list is handed back so the caller can run it before the rest
/// of the line is read. Call [`Tokenizer::finish`] at end of line.
#[derive(Debug, Default)]
pub struct Tokenizer {
    state: State,
    /// Argument under construction outside quotes.
    current: String,
    /// Text inside the currently open quote.
    quoted: String,
    /// Completed arguments of the current sub-line.
    args: Vec<String>,
}

impl Tokenizer {
    /// Create a tokenizer positioned at the start of a line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, mostly useful for diagnostics.
    pub fn state(&self) -> State {
        self.state
    }

    /// Consume one character.
    ///
    /// Returns the argument list of a sub-line when `c` completes one.
    pub fn feed(&mut self, c: char) -> Option<Vec<String>> {
        match self.state {
            State::Normal => self.normal(c),
            State::Comment => self.comment(c),
            State::AfterSeparator => self.after_separator(c),
            State::Quoted { quote, resume } => {
                self.in_quote(c, quote, resume);
                None
            }
            State::EscapeNormal => {
                push_escaped(&mut self.current, c);
                self.state = State::Normal;
                None
            }
            State::EscapeComment => {
                self.state = State::Comment;
                None
            }
            State::EscapeQuoted { quote, resume } => {
                push_escaped(&mut self.quoted, c);
                self.state = State::Quoted { quote, resume };
                None
            }
        }
    }

    /// Finish the line, returning the last sub-line if it has any arguments.
    ///
    /// Text inside an unterminated quote and a trailing lone backslash are
    /// dropped.
    pub fn finish(mut self) -> Option<Vec<String>> {
        self.flush_arg();
        self.take_args()
    }

    fn normal(&mut self, c: char) -> Option<Vec<String>> {
        if let Some(quote) = Quote::from_char(c) {
            self.state = State::quoted(quote, Resume::Normal);
            return None;
        }
        match c {
            COMMENT => {
                self.flush_arg();
                self.state = State::Comment;
                None
            }
            SEPARATOR => {
                self.flush_arg();
                self.state = State::AfterSeparator;
                self.take_args()
            }
            ESCAPE => {
                self.state = State::EscapeNormal;
                None
            }
            ' ' => {
                self.flush_arg();
                None
            }
            _ => {
                self.current.push(c);
                None
            }
        }
    }

    fn comment(&mut self, c: char) -> Option<Vec<String>> {
        if let Some(quote) = Quote::from_char(c) {
            self.state = State::quoted(quote, Resume::Comment);
            return None;
        }
        match c {
            SEPARATOR => {
                self.state = State::AfterSeparator;
                self.take_args()
            }
            ESCAPE => {
                self.state = State::EscapeComment;
                None
            }
            _ => None,
        }
    }

    fn after_separator(&mut self, c: char) -> Option<Vec<String>> {
        if let Some(quote) = Quote::from_char(c) {
            self.state = State::quoted(quote, Resume::Normal);
            return None;
        }
        match c {
            ' ' | SEPARATOR => {}
            COMMENT => {
                self.current.clear();
                self.state = State::Comment;
            }
            ESCAPE => self.state = State::EscapeNormal,
            _ => {
                self.current.clear();
                self.current.push(c);
                self.state = State::Normal;
            }
        }
        None
    }

    fn in_quote(&mut self, c: char, quote: Quote, resume: Resume) {
        if c == ESCAPE {
            self.state = State::EscapeQuoted { quote, resume };
        } else if c == quote.closing() {
            match resume {
                Resume::Normal => {
                    self.current.push_str(&self.quoted);
                    self.state = State::Normal;
                }
                Resume::Comment => self.state = State::Comment,
            }
            self.quoted.clear();
        } else {
            self.quoted.push(c);
        }
    }

    fn flush_arg(&mut self) {
        if !self.current.is_empty() {
            self.args.push(std::mem::take(&mut self.current));
        }
    }

    fn take_args(&mut self) -> Option<Vec<String>> {
        if self.args.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.args))
        }
    }
}

/// Append the character following a backslash.
///
/// Escapable characters become literals; anything else keeps its backslash.
fn push_escaped(buf: &mut String, c: char) {
    if !ESCAPABLE.contains(&c) {
        buf.push(ESCAPE);
    }
    buf.push(c);
}

/// Split a whole line into the argument lists it would dispatch, in order.
pub fn split_line(line: &str) -> Vec<Vec<String>> {
    let mut tokenizer = Tokenizer::new();
    let mut lists: Vec<Vec<String>> = line.chars().filter_map(|c| tokenizer.feed(c)).collect();
    lists.extend(tokenizer.finish());
    lists
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<Vec<String>> {
        split_line(line)
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(split("ls -la /tmp"), vec![vec!["ls", "-la", "/tmp"]]);
    }

    #[test]
    fn test_runs_of_spaces() {
        assert_eq!(split("   a    b  "), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert!(split("").is_empty());
        assert!(split("     ").is_empty());
    }

    #[test]
    fn test_separator() {
        assert_eq!(split("foo; bar"), vec![vec!["foo"], vec!["bar"]]);
    }

    #[test]
    fn test_separator_without_spaces() {
        assert_eq!(split("foo;bar"), vec![vec!["foo"], vec!["bar"]]);
    }

    #[test]
    fn test_consecutive_separators() {
        assert_eq!(split("a;;; ;b"), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_leading_and_trailing_separators() {
        assert_eq!(split(";a;"), vec![vec!["a"]]);
    }

    #[test]
    fn test_escaped_separator() {
        assert_eq!(split("foo\\; bar"), vec![vec!["foo;", "bar"]]);
    }

    #[test]
    fn test_whole_line_comment() {
        assert!(split("# ignore this").is_empty());
    }

    #[test]
    fn test_separator_in_leading_comment_dispatches_nothing() {
        assert_eq!(split("# ignore ; this"), vec![vec!["this"]]);
    }

    #[test]
    fn test_comment_ends_at_separator() {
        assert_eq!(split("a #b; c"), vec![vec!["a"], vec!["c"]]);
    }

    #[test]
    fn test_comment_directly_after_word() {
        assert_eq!(split("a#b c"), vec![vec!["a"]]);
    }

    #[test]
    fn test_comment_after_separator() {
        assert_eq!(split("a; # note; b"), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_single_quotes_hide_separator() {
        assert_eq!(split("'a;b' c"), vec![vec!["a;b", "c"]]);
    }

    #[test]
    fn test_quotes_hide_comment_and_spaces() {
        assert_eq!(split("\"a # b\" c"), vec![vec!["a # b", "c"]]);
    }

    #[test]
    fn test_escaped_quote_in_double_quotes() {
        assert_eq!(split("\"a\\\"b\""), vec![vec!["a\"b"]]);
    }

    #[test]
    fn test_escaped_quote_in_single_quotes() {
        assert_eq!(split("'it\\'s'"), vec![vec!["it's"]]);
    }

    #[test]
    fn test_other_quote_is_literal_inside_quotes() {
        assert_eq!(split("\"it's\" 'say \"hi\"'"), vec![vec!["it's", "say \"hi\""]]);
    }

    #[test]
    fn test_quote_joins_adjacent_text() {
        assert_eq!(split("pre'mid dle'post"), vec![vec!["premid dlepost"]]);
    }

    #[test]
    fn test_quote_opened_after_separator() {
        assert_eq!(split("a;'b c'"), vec![vec!["a"], vec!["b c"]]);
    }

    #[test]
    fn test_quote_inside_comment_hides_separator() {
        assert_eq!(split("a # 'x;y' ; b"), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_quote_closed_in_comment_stays_in_comment() {
        assert_eq!(split("a #'q' b"), vec![vec!["a"]]);
    }

    #[test]
    fn test_escaped_separator_in_comment_does_not_dispatch() {
        assert_eq!(split("a # x\\; y"), vec![vec!["a"]]);
    }

    #[test]
    fn test_escaped_comment_marker() {
        assert_eq!(split("\\#tag x"), vec![vec!["#tag", "x"]]);
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(split("a\\\\b"), vec![vec!["a\\b"]]);
    }

    #[test]
    fn test_failed_escape_keeps_backslash() {
        assert_eq!(split("a\\nb"), vec![vec!["a\\nb"]]);
        assert_eq!(split("'a\\nb'"), vec![vec!["a\\nb"]]);
        assert_eq!(split("\"a\\tb\""), vec![vec!["a\\tb"]]);
    }

    #[test]
    fn test_failed_escape_of_space() {
        assert_eq!(split("a\\ b"), vec![vec!["a\\ b"]]);
    }

    #[test]
    fn test_escape_after_separator() {
        assert_eq!(split("a;\\;b"), vec![vec!["a"], vec![";b"]]);
        assert_eq!(split("a;\\xb"), vec![vec!["a"], vec!["\\xb"]]);
    }

    #[test]
    fn test_unterminated_quote_is_dropped() {
        assert_eq!(split("a 'b c"), vec![vec!["a"]]);
    }

    #[test]
    fn test_unterminated_quote_keeps_prefix() {
        assert_eq!(split("a b'cd"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_dangling_escape_is_dropped() {
        assert_eq!(split("a b\\"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_empty_quotes_add_nothing() {
        assert_eq!(split("a '' b"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_state_after_feed() {
        let mut t = Tokenizer::new();
        assert_eq!(t.feed('\''), None);
        assert_eq!(t.state(), State::quoted(Quote::Single, Resume::Normal));
        t.feed('\\');
        assert_eq!(
            t.state(),
            State::EscapeQuoted {
                quote: Quote::Single,
                resume: Resume::Normal
            }
        );
        t.feed('x');
        assert_eq!(t.state(), State::quoted(Quote::Single, Resume::Normal));
    }

    #[test]
    fn test_feed_returns_list_at_separator() {
        let mut t = Tokenizer::new();
        for c in "x y".chars() {
            assert_eq!(t.feed(c), None);
        }
        assert_eq!(
            t.feed(';'),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(t.state(), State::AfterSeparator);
        assert_eq!(t.finish(), None);
    }

    #[test]
    fn test_split_is_repeatable() {
        let line = "a 'b;c' # d ; e\\; f";
        assert_eq!(split_line(line), split_line(line));
    }
}
