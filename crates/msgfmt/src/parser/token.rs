//! Grammar-aware tokens produced by the lexer.

use std::ops::Range;

use serde::Serialize;

/// The class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `let`, `match`, or `when`.
    Keyword,
    /// `$name`, stored without the sigil.
    VariableName,
    /// `:name`, stored without the sigil.
    FunctionName,
    /// `+name`, stored without the sigil.
    MarkupStart,
    /// `-name`, stored without the sigil.
    MarkupEnd,
    /// An option name.
    Name,
    /// A bare key or option value.
    Nmtoken,
    /// A parenthesized literal, unescaped.
    Literal,
    /// The `*` variant key.
    Asterisk,
    /// Pattern text, unescaped.
    Text,
    /// `{`, `}`, or `=`.
    Punctuator,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::VariableName => "variable_name",
            TokenKind::FunctionName => "function_name",
            TokenKind::MarkupStart => "markup_start",
            TokenKind::MarkupEnd => "markup_end",
            TokenKind::Name => "name",
            TokenKind::Nmtoken => "nmtoken",
            TokenKind::Literal => "literal",
            TokenKind::Asterisk => "asterisk",
            TokenKind::Text => "text",
            TokenKind::Punctuator => "punctuator",
        }
    }
}

/// A token: one or more atoms reclassified against the grammar context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == keyword
    }

    pub fn is_punctuator(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }
}
