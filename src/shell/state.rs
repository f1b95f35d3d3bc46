//! Parser states for the line tokenizer.

/// Separates sub-lines on one prompt line.
pub const SEPARATOR: char = ';';
/// Starts a comment that runs until the next separator.
pub const COMMENT: char = '#';
/// Escapes the following character.
pub const ESCAPE: char = '\\';
/// Characters an escape turns into literals. Anything else is a failed escape.
pub const ESCAPABLE: &[char] = &[COMMENT, SEPARATOR, ESCAPE, '\'', '"'];

/// Which quote character opened a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    /// Map a character to the quote it opens, if any.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Quote::Single),
            '"' => Some(Quote::Double),
            _ => None,
        }
    }

    /// The character that closes this quote.
    pub fn closing(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// The outer context a quote returns to when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// Quoted text joins the current argument.
    Normal,
    /// Quoted text is thrown away with the rest of the comment.
    Comment,
}

/// Tokenizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Accumulating an argument.
    #[default]
    Normal,
    /// Inside a comment; characters are discarded until a separator.
    Comment,
    /// Just after a separator; leading spaces and extra separators are skipped.
    AfterSeparator,
    /// Inside a quoted string.
    Quoted { quote: Quote, resume: Resume },
    /// Backslash seen in `Normal` or `AfterSeparator`.
    EscapeNormal,
    /// Backslash seen inside a comment.
    EscapeComment,
    /// Backslash seen inside a quoted string.
    EscapeQuoted { quote: Quote, resume: Resume },
}

impl State {
    /// Enter a quoted string opened from the given context.
    pub fn quoted(quote: Quote, resume: Resume) -> Self {
        State::Quoted { quote, resume }
    }
}
