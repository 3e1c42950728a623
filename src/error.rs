//! The error taxonomy.
//!
//! Every variant carries the 0-based `(line, column)` of the offending
//! token and, when the raising site had the source text at hand, the
//! original line text. [`Display`] renders both to the `at <line>:<column>
//! | <line-text>` form required of every error message; when only the
//! location is known it falls back to `at <line>:<column>`.

use std::fmt::{self, Display};

#[derive(Debug, Clone)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
    pub line_text: Option<String>,
}

impl Loc {
    pub fn new(line: usize, column: usize) -> Self {
        Loc {
            line,
            column,
            line_text: None,
        }
    }

    /// Attaches the text of `line` from `source_lines`, if present.
    pub fn with_source(line: usize, column: usize, source_lines: &[String]) -> Self {
        Loc {
            line,
            column,
            line_text: source_lines.get(line).cloned(),
        }
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}:{}", self.line + 1, self.column)?;
        if let Some(text) = &self.line_text {
            write!(f, " | {text}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum Error {
    /// Unexpected character while tokenising.
    Lex { message: String, loc: Loc },
    /// A token of the wrong kind, or unexpected EOF, while parsing.
    Parse { message: String, loc: Loc },
    /// Unknown transformation, builtin, or unlink target.
    Name { message: String, loc: Loc },
    /// A name is claimed by both `symbols` and `transformations`.
    Conflict { message: String, loc: Loc },
    /// A subject is incompatible with a pattern, or with every rule in a form.
    Match { message: String, loc: Loc },
    /// A CTCall was evaluated outside a form definition.
    Mode { message: String, loc: Loc },
    /// A code path believed unreachable was reached.
    Internal(String),
}

impl Error {
    pub fn lex(message: impl Into<String>, loc: Loc) -> Self {
        Error::Lex {
            message: message.into(),
            loc,
        }
    }
    pub fn parse(message: impl Into<String>, loc: Loc) -> Self {
        Error::Parse {
            message: message.into(),
            loc,
        }
    }
    pub fn name(message: impl Into<String>, loc: Loc) -> Self {
        Error::Name {
            message: message.into(),
            loc,
        }
    }
    pub fn conflict(message: impl Into<String>, loc: Loc) -> Self {
        Error::Conflict {
            message: message.into(),
            loc,
        }
    }
    pub fn match_fail(message: impl Into<String>, loc: Loc) -> Self {
        Error::Match {
            message: message.into(),
            loc,
        }
    }
    pub fn mode(message: impl Into<String>, loc: Loc) -> Self {
        Error::Mode {
            message: message.into(),
            loc,
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex { message, loc } => write!(f, "{message} {loc}"),
            Error::Parse { message, loc } => write!(f, "{message} {loc}"),
            Error::Name { message, loc } => write!(f, "{message} {loc}"),
            Error::Conflict { message, loc } => write!(f, "{message} {loc}"),
            Error::Match { message, loc } => write!(f, "{message} {loc}"),
            Error::Mode { message, loc } => write!(f, "{message} {loc}"),
            Error::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
