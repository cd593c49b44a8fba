//! Context-sensitive lexer.
//!
//! Pulls atoms from the scanner one at a time and reclassifies them into
//! tokens. The rules for consuming atoms depend on the syntactic region
//! being scanned: top-level declarations, match headers, variant keys,
//! pattern bodies, expression bodies, and option lists.

use std::mem;
use std::ops::Range;

use tracing::trace;

use super::atoms::{Atom, AtomKind, Atoms, scan};
use super::error::LexError;
use super::names::{is_name, is_nmtoken};
use super::token::{Token, TokenKind};

/// Lex `source` into a vector of tokens.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered; the lexer never recovers.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    Lexer::new(source).run(|token| tokens.push(token))?;
    Ok(tokens)
}

/// A lexer over one message source.
pub struct Lexer<'a> {
    source: &'a str,
    atoms: Atoms<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            atoms: scan(source),
        }
    }

    /// Lex the whole source, handing each token to `sink` as soon as it is
    /// classified.
    pub fn run(self, sink: impl FnMut(Token)) -> Result<(), LexError> {
        let mut state = LexState {
            source: self.source,
            atoms: self.atoms,
            sink,
        };
        state.message()
    }
}

struct LexState<'a, F> {
    source: &'a str,
    atoms: Atoms<'a>,
    sink: F,
}

impl<F: FnMut(Token)> LexState<'_, F> {
    fn message(&mut self) -> Result<(), LexError> {
        let mut current = self.next_ignore_whitespace()?;

        while current.is_word("let") {
            self.emit_let(current)?;
            current = self.next_ignore_whitespace()?;
        }

        if current.is_word("match") {
            return self.emit_match(current);
        }
        if !current.is_punctuator('{') {
            return Err(self.error("Expected 'let', 'match' or '{'", &current));
        }
        self.emit_pattern(current)?;
        match self.next_ignore_whitespace_or_end()? {
            Some(trailing) => Err(self.error("Expected end of input", &trailing)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // emit_* methods consume the atoms of one syntactic region.

    fn emit_let(&mut self, current: Atom) -> Result<(), LexError> {
        self.emit_keyword("let", current)?;
        self.expect_whitespace("Expected whitespace after 'let'")?;

        let current = self.next_include_whitespace()?;
        self.emit_variable_name(current)?;
        self.expect_whitespace("Expected whitespace before '='")?;

        let current = self.next_include_whitespace()?;
        self.emit_punctuator('=', current)?;
        self.expect_whitespace("Expected whitespace after '='")?;

        let current = self.next_include_whitespace()?;
        self.emit_expression(current)
    }

    fn emit_match(&mut self, current: Atom) -> Result<(), LexError> {
        self.emit_keyword("match", current)?;

        let current = self.next_ignore_whitespace()?;
        self.emit_expression(current)?;

        let mut current = self.next_ignore_whitespace()?;
        while current.is_punctuator('{') {
            self.emit_expression(current)?;
            current = self.next_ignore_whitespace()?;
        }

        if !current.is_word("when") {
            return Err(self.error("Expected 'when'", &current));
        }
        self.emit_when(current)?;

        loop {
            match self.next_ignore_whitespace_or_end()? {
                None => return Ok(()),
                Some(current) if current.is_word("when") => self.emit_when(current)?,
                Some(current) => {
                    return Err(self.error("Expected 'when' or end of input", &current));
                }
            }
        }
    }

    fn emit_when(&mut self, current: Atom) -> Result<(), LexError> {
        self.emit_keyword("when", current)?;
        self.expect_whitespace("Expected whitespace after 'when'")?;

        // At least one key is required.
        let current = self.next_include_whitespace()?;
        self.emit_key(current)?;

        let open = loop {
            let current = self.next_include_whitespace()?;
            if current.is_punctuator('{') {
                break current;
            }
            if !current.is_whitespace() {
                return Err(self.error("Expected whitespace between variant keys", &current));
            }
            let current = self.next_include_whitespace()?;
            if current.is_punctuator('{') {
                break current;
            }
            self.emit_key(current)?;
        };

        self.emit_pattern(open)
    }

    fn emit_pattern(&mut self, open: Atom) -> Result<(), LexError> {
        self.emit(TokenKind::Punctuator, open.value, open.span);

        let mut text = String::new();
        let mut text_span: Option<Range<usize>> = None;
        loop {
            let current = self.next_include_whitespace()?;
            if current.is_punctuator('{') || current.is_punctuator('}') {
                if let Some(span) = text_span.take() {
                    self.emit(TokenKind::Text, mem::take(&mut text), span);
                }
                if current.is_punctuator('}') {
                    self.emit(TokenKind::Punctuator, current.value, current.span);
                    return Ok(());
                }
                self.emit_expression(current)?;
                continue;
            }

            if current.kind == AtomKind::Escape {
                match current.value.as_str() {
                    "\\{" | "\\}" | "\\\\" => text.push_str(&current.value[1..]),
                    _ => return Err(self.error("Unexpected escape sequence", &current)),
                }
            } else {
                text.push_str(&current.value);
            }
            text_span = Some(match text_span {
                Some(span) => span.start..current.span.end,
                None => current.span,
            });
        }
    }

    fn emit_expression(&mut self, open: Atom) -> Result<(), LexError> {
        self.emit_punctuator('{', open)?;

        let current = self.next_ignore_whitespace()?;
        let first = current.value.chars().next();
        match first {
            Some(':') => {
                self.emit_sigil_name(':', TokenKind::FunctionName, "Expected function name", current)?;
                return self.emit_options();
            }
            Some('+') => {
                self.emit_sigil_name('+', TokenKind::MarkupStart, "Expected markup start", current)?;
                return self.emit_options();
            }
            Some('-') => {
                self.emit_sigil_name('-', TokenKind::MarkupEnd, "Expected markup end", current)?;
                let current = self.next_ignore_whitespace()?;
                if !current.is_punctuator('}') {
                    return Err(self.error("Expected }", &current));
                }
                self.emit(TokenKind::Punctuator, current.value, current.span);
                return Ok(());
            }
            Some('$') => self.emit_variable_name(current)?,
            _ if current.is_punctuator('(') => self.emit_literal(current)?,
            _ => {
                return Err(self.error("Expected variable, literal, or function", &current));
            }
        }

        // An operand closes immediately or takes a function annotation.
        let mut current = self.next_include_whitespace()?;
        if current.is_whitespace() {
            current = self.next_include_whitespace()?;
            if !current.is_punctuator('}') {
                self.emit_sigil_name(':', TokenKind::FunctionName, "Expected function name", current)?;
                return self.emit_options();
            }
        }
        if !current.is_punctuator('}') {
            return Err(self.error("Expected } or whitespace", &current));
        }
        self.emit(TokenKind::Punctuator, current.value, current.span);
        Ok(())
    }

    fn emit_options(&mut self) -> Result<(), LexError> {
        let close = loop {
            let current = self.next_include_whitespace()?;
            if current.is_punctuator('}') {
                break current;
            }
            if !current.is_whitespace() {
                return Err(self.error("Expected whitespace between options", &current));
            }
            let current = self.next_include_whitespace()?;
            if current.is_punctuator('}') {
                break current;
            }
            if current.kind != AtomKind::Word || !is_name(&current.value) {
                return Err(self.error("Expected option name", &current));
            }
            self.emit(TokenKind::Name, current.value, current.span);

            let current = self.next_ignore_whitespace()?;
            self.emit_punctuator('=', current)?;

            let current = self.next_ignore_whitespace()?;
            if current.value.starts_with('$') {
                self.emit_variable_name(current)?;
            } else if current.is_punctuator('(') {
                self.emit_literal(current)?;
            } else {
                self.emit_nmtoken(current)?;
            }
        };
        self.emit(TokenKind::Punctuator, close.value, close.span);
        Ok(())
    }

    fn emit_key(&mut self, current: Atom) -> Result<(), LexError> {
        if current.kind != AtomKind::Punctuator {
            return self.emit_nmtoken(current);
        }
        if current.is_punctuator('*') {
            self.emit(TokenKind::Asterisk, current.value, current.span);
            return Ok(());
        }
        if current.is_punctuator('(') {
            return self.emit_literal(current);
        }
        Err(self.error("Expected a valid key", &current))
    }

    fn emit_literal(&mut self, open: Atom) -> Result<(), LexError> {
        let start = open.span.start;
        let mut value = String::new();
        loop {
            let current = self.next_include_whitespace()?;
            if current.is_punctuator(')') {
                self.emit(TokenKind::Literal, value, start..current.span.end);
                return Ok(());
            }
            if current.kind == AtomKind::Escape {
                match current.value.as_str() {
                    "\\(" | "\\)" | "\\\\" => value.push_str(&current.value[1..]),
                    _ => return Err(self.error("Unexpected escape sequence", &current)),
                }
            } else {
                value.push_str(&current.value);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Single-atom classification.

    fn emit_keyword(&mut self, keyword: &str, current: Atom) -> Result<(), LexError> {
        if !current.is_word(keyword) {
            return Err(self.error(&format!("Expected keyword: {keyword}"), &current));
        }
        self.emit(TokenKind::Keyword, current.value, current.span);
        Ok(())
    }

    fn emit_punctuator(&mut self, c: char, current: Atom) -> Result<(), LexError> {
        if !current.is_punctuator(c) {
            return Err(self.error(&format!("Expected {c}"), &current));
        }
        self.emit(TokenKind::Punctuator, current.value, current.span);
        Ok(())
    }

    fn emit_variable_name(&mut self, current: Atom) -> Result<(), LexError> {
        self.emit_sigil_name('$', TokenKind::VariableName, "Expected variable name", current)
    }

    fn emit_sigil_name(
        &mut self,
        sigil: char,
        kind: TokenKind,
        message: &str,
        current: Atom,
    ) -> Result<(), LexError> {
        match current.value.strip_prefix(sigil) {
            Some(name) if current.kind == AtomKind::Word && is_name(name) => {
                let name = name.to_string();
                self.emit(kind, name, current.span);
                Ok(())
            }
            _ => Err(self.error(message, &current)),
        }
    }

    fn emit_nmtoken(&mut self, current: Atom) -> Result<(), LexError> {
        if current.kind != AtomKind::Word || !is_nmtoken(&current.value) {
            return Err(self.error("Expected nmtoken", &current));
        }
        self.emit(TokenKind::Nmtoken, current.value, current.span);
        Ok(())
    }

    fn expect_whitespace(&mut self, message: &str) -> Result<(), LexError> {
        let current = self.next_include_whitespace()?;
        if !current.is_whitespace() {
            return Err(self.error(message, &current));
        }
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, value: String, span: Range<usize>) {
        trace!(kind = kind.as_str(), %value, ?span, "token");
        (self.sink)(Token { kind, value, span });
    }

    // ------------------------------------------------------------------------
    // Low-level iteration.

    fn next_ignore_whitespace_or_end(&mut self) -> Result<Option<Atom>, LexError> {
        loop {
            match self.atoms.next().transpose()? {
                Some(atom) if atom.is_whitespace() => {}
                other => return Ok(other),
            }
        }
    }

    fn next_ignore_whitespace(&mut self) -> Result<Atom, LexError> {
        self.next_ignore_whitespace_or_end()?
            .ok_or_else(|| LexError::unexpected_end(self.source))
    }

    fn next_include_whitespace(&mut self) -> Result<Atom, LexError> {
        self.atoms
            .next()
            .transpose()?
            .ok_or_else(|| LexError::unexpected_end(self.source))
    }

    fn error(&self, message: &str, current: &Atom) -> LexError {
        LexError::new(message, current.span.clone(), self.source)
    }
}
