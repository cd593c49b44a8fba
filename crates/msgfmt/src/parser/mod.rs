//! Message lexer and parser.
//!
//! Source text flows through three stages: the atom scanner segments it
//! into context-free runs, the lexer reclassifies atoms into tokens based on
//! the grammatical region, and the parser builds an immutable [`Message`].

pub mod ast;
pub mod atoms;
pub mod error;
mod lexer;
mod message;
pub mod names;
pub mod token;

pub use ast::*;
pub use atoms::{Atom, AtomKind, scan};
pub use error::{LexError, ParseError};
pub use lexer::{Lexer, tokenize};
pub use message::parse_message;
pub use token::{Token, TokenKind};
