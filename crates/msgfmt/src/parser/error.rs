//! Lexing and parsing error types.

use std::ops::Range;

use thiserror::Error;

use crate::error::ErrorKind;

/// Maximum number of source bytes quoted after the offending atom.
const SNIPPET_LEN: usize = 20;

/// An error raised while segmenting or lexing message source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: ...{snippet}")]
pub struct LexError {
    pub message: String,
    /// Byte range of the offending atom.
    pub span: Range<usize>,
    /// Source text starting at the offending atom, for diagnostics.
    pub snippet: String,
}

impl LexError {
    /// Create an error for `span`, quoting the surrounding source.
    pub fn new(message: impl Into<String>, span: Range<usize>, source: &str) -> Self {
        let start = floor_char_boundary(source, span.start);
        let end = floor_char_boundary(source, span.end.saturating_add(SNIPPET_LEN));
        LexError {
            message: message.into(),
            snippet: source[start..end.max(start)].to_string(),
            span,
        }
    }

    /// Create an error for input that ended where more was required.
    pub fn unexpected_end(source: &str) -> Self {
        LexError::new("Unexpected end of input", source.len()..source.len(), source)
    }
}

fn floor_char_boundary(source: &str, index: usize) -> usize {
    let mut index = index.min(source.len());
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// An error that occurred while turning source text into a [`Message`].
///
/// [`Message`]: super::Message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer rejected the source.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token stream does not match a grammar production.
    #[error("{message}")]
    Syntax { message: String, span: Range<usize> },

    /// The token stream ended inside a production.
    #[error("unexpected end of input")]
    UnexpectedEof { offset: usize },
}

impl ParseError {
    /// The error category, for diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex(_) => ErrorKind::Lexing,
            ParseError::Syntax { .. } | ParseError::UnexpectedEof { .. } => ErrorKind::Syntax,
        }
    }

    /// Byte range in the source the error refers to.
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::Lex(e) => e.span.clone(),
            ParseError::Syntax { span, .. } => span.clone(),
            ParseError::UnexpectedEof { offset } => *offset..*offset,
        }
    }
}
