//! Atom scanner.
//!
//! Segments raw source into context-free runs of characters: words,
//! single-character punctuators, whitespace runs, and two-character escapes.
//! Atoms know nothing about the grammar; the lexer reclassifies them.

use std::ops::Range;

use serde::Serialize;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, one_of, take_while};

use super::error::LexError;

/// Characters that always form a single-character atom.
pub const PUNCTUATORS: [char; 6] = ['{', '}', '=', '*', '(', ')'];

/// The class of an [`Atom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomKind {
    Word,
    Punctuator,
    Whitespace,
    Escape,
}

/// A context-free slice of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub kind: AtomKind,
    pub value: String,
    /// Byte range of the atom in the source.
    pub span: Range<usize>,
}

impl Atom {
    /// Returns true if this is a word atom equal to `word`.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == AtomKind::Word && self.value == word
    }

    /// Returns true if this is the punctuator `c`.
    pub fn is_punctuator(&self, c: char) -> bool {
        self.kind == AtomKind::Punctuator && self.value.starts_with(c)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == AtomKind::Whitespace
    }
}

type Input<'a> = LocatingSlice<&'a str>;

/// Split `source` into atoms.
///
/// The returned iterator is finite and cannot be rewound; call `scan` again
/// to restart. It yields a single error if the source ends with an
/// unterminated backslash, and nothing afterwards.
pub fn scan(source: &str) -> Atoms<'_> {
    Atoms {
        source,
        input: LocatingSlice::new(source),
        done: false,
    }
}

/// Iterator over the atoms of a source string. See [`scan`].
pub struct Atoms<'a> {
    source: &'a str,
    input: Input<'a>,
    done: bool,
}

impl Iterator for Atoms<'_> {
    type Item = Result<Atom, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.input.is_empty() {
            return None;
        }
        let offset = self.source.len() - self.input.len();
        match atom.parse_next(&mut self.input) {
            Ok(atom) => Some(Ok(atom)),
            Err(_) => {
                // Only a trailing backslash fails to scan.
                self.done = true;
                Some(Err(LexError::new(
                    "Unterminated escape sequence",
                    offset..self.source.len(),
                    self.source,
                )))
            }
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\r' | '\n' | ' ')
}

fn is_word_char(c: char) -> bool {
    !is_whitespace(c) && !PUNCTUATORS.contains(&c) && c != '\\'
}

fn atom(input: &mut Input<'_>) -> ModalResult<Atom> {
    alt((whitespace, punctuator, escape, word))
        .with_span()
        .map(|((kind, value), span)| Atom {
            kind,
            value: value.to_string(),
            span,
        })
        .parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> ModalResult<(AtomKind, &'a str)> {
    take_while(1.., is_whitespace)
        .map(|s| (AtomKind::Whitespace, s))
        .parse_next(input)
}

fn punctuator<'a>(input: &mut Input<'a>) -> ModalResult<(AtomKind, &'a str)> {
    one_of(PUNCTUATORS)
        .take()
        .map(|s| (AtomKind::Punctuator, s))
        .parse_next(input)
}

fn escape<'a>(input: &mut Input<'a>) -> ModalResult<(AtomKind, &'a str)> {
    ('\\', any)
        .take()
        .map(|s| (AtomKind::Escape, s))
        .parse_next(input)
}

fn word<'a>(input: &mut Input<'a>) -> ModalResult<(AtomKind, &'a str)> {
    take_while(1.., is_word_char)
        .map(|s| (AtomKind::Word, s))
        .parse_next(input)
}
