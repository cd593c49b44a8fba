//! Error classification shared by every stage of the pipeline.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

use serde::Serialize;
use thiserror::Error;

use crate::interpreter::EvalError;
use crate::parser::{LexError, ParseError};

/// The category an error belongs to.
///
/// Lexing and parsing errors always carry a source span; runtime errors
/// abort the whole formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed escape, unexpected character, or premature end of input.
    Lexing,
    /// The token stream does not match a grammar production.
    Syntax,
    /// An unknown function, variable, or glossary term.
    Reference,
    /// A value does not have the shape an operation expects.
    Type,
    /// No variant matched, or a locale is not supported.
    Range,
}

impl ErrorKind {
    /// The name printed in diagnostics, e.g. `SyntaxError`.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Lexing => "LexingError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Range => "RangeError",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Any error from parsing or formatting a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Error::Parse(ParseError::Lex(error))
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(e) => e.kind(),
            Error::Eval(e) => e.kind(),
        }
    }

    /// Byte range in the message source, for parse errors.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Error::Parse(e) => Some(e.span()),
            Error::Eval(_) => None,
        }
    }
}
