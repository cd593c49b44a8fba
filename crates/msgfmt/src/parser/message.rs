//! Recursive-descent message parser.
//!
//! Consumes the lexer's token stream and builds a [`Message`]. The lexer
//! guarantees the stream is unambiguous, so every routine consumes exactly
//! the tokens it owns without backtracking. Structural rules the lexer does
//! not check (key counts, duplicate options) are enforced here.

use std::iter::Peekable;
use std::ops::Range;
use std::vec::IntoIter;

use tracing::debug;

use super::ast::{
    Declaration, Expression, FunctionExpression, MarkupClose, MarkupOpen, Message, Operand,
    Options, Pattern, PatternElement, Variant, VariantKey,
};
use super::error::ParseError;
use super::lexer::tokenize;
use super::token::{Token, TokenKind};

/// Parse message source into an AST.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] if the source cannot be lexed, and
/// [`ParseError::Syntax`] if the tokens violate a structural rule.
///
/// # Example
///
/// ```
/// use msgfmt::parser::{PatternElement, parse_message};
///
/// let message = parse_message("{Hello, {$name}!}").unwrap();
/// assert!(message.is_plain());
/// assert_eq!(
///     message.variants[0].pattern.elements[0],
///     PatternElement::Text("Hello, ".into())
/// );
/// ```
pub fn parse_message(source: &str) -> Result<Message, ParseError> {
    let tokens = tokenize(source)?;
    let message = Parser::new(tokens, source.len()).message()?;
    debug!(
        declarations = message.declarations.len(),
        selectors = message.selectors.len(),
        variants = message.variants.len(),
        "parsed message"
    );
    Ok(message)
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    end: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, end: usize) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
            end,
        }
    }

    fn message(&mut self) -> Result<Message, ParseError> {
        let mut declarations = Vec::new();
        let mut current = self.next_token()?;
        while current.is_keyword("let") {
            declarations.push(self.declaration()?);
            current = self.next_token()?;
        }

        if current.is_punctuator("{") {
            let pattern = self.pattern()?;
            self.expect_end()?;
            return Ok(Message {
                declarations,
                selectors: Vec::new(),
                variants: vec![Variant {
                    keys: Vec::new(),
                    pattern,
                }],
            });
        }

        if !current.is_keyword("match") {
            return Err(syntax("Expected 'let', 'match' or '{'", current.span));
        }

        let mut selectors = Vec::new();
        current = self.next_token()?;
        while current.is_punctuator("{") {
            selectors.push(self.expression()?);
            current = self.next_token()?;
        }
        if selectors.is_empty() {
            return Err(syntax("Expected at least one selector", current.span));
        }

        let mut variants = Vec::new();
        loop {
            if !current.is_keyword("when") {
                return Err(syntax("Expected 'when'", current.span));
            }
            variants.push(self.variant(current.span, selectors.len())?);
            match self.tokens.next() {
                Some(token) => current = token,
                None => break,
            }
        }

        Ok(Message {
            declarations,
            selectors,
            variants,
        })
    }

    fn declaration(&mut self) -> Result<Declaration, ParseError> {
        let name = self.expect_kind(TokenKind::VariableName, "Expected variable name")?;
        self.expect_punctuator("=")?;
        self.expect_punctuator("{")?;
        let expression = self.expression()?;
        Ok(Declaration {
            name: name.value,
            expression,
        })
    }

    fn variant(&mut self, when: Range<usize>, selectors: usize) -> Result<Variant, ParseError> {
        let mut keys = Vec::new();
        let open = loop {
            let current = self.next_token()?;
            match current.kind {
                TokenKind::Punctuator if current.value == "{" => break current,
                TokenKind::Asterisk => keys.push(VariantKey::Asterisk),
                TokenKind::Literal | TokenKind::Nmtoken => {
                    keys.push(VariantKey::Literal(current.value));
                }
                _ => return Err(syntax("Expected a variant key", current.span)),
            }
        };

        if keys.is_empty() {
            return Err(syntax("Expected at least one variant key", when.start..open.span.end));
        }
        if keys.len() != selectors {
            return Err(syntax(
                format!(
                    "Variant has {} key(s) but the message has {} selector(s)",
                    keys.len(),
                    selectors
                ),
                when.start..open.span.end,
            ));
        }

        let pattern = self.pattern()?;
        Ok(Variant { keys, pattern })
    }

    fn pattern(&mut self) -> Result<Pattern, ParseError> {
        let mut elements = Vec::new();
        loop {
            let current = self.next_token()?;
            match current.kind {
                TokenKind::Punctuator if current.value == "}" => break,
                TokenKind::Punctuator if current.value == "{" => {
                    elements.push(self.placeholder()?);
                }
                TokenKind::Text => elements.push(PatternElement::Text(current.value)),
                _ => return Err(syntax("Unexpected token in pattern", current.span)),
            }
        }
        Ok(Pattern { elements })
    }

    fn placeholder(&mut self) -> Result<PatternElement, ParseError> {
        let kind = self.tokens.peek().map(|token| token.kind);
        match kind {
            Some(TokenKind::MarkupStart) => {
                let name = self.next_token()?.value;
                let options = self.options()?;
                Ok(PatternElement::MarkupOpen(MarkupOpen { name, options }))
            }
            Some(TokenKind::MarkupEnd) => {
                let name = self.next_token()?.value;
                self.expect_punctuator("}")?;
                Ok(PatternElement::MarkupClose(MarkupClose { name }))
            }
            _ => Ok(PatternElement::Expression(self.expression()?)),
        }
    }

    /// Parse the body of an expression after its opening `{`, through the
    /// closing `}`.
    fn expression(&mut self) -> Result<Expression, ParseError> {
        let current = self.next_token()?;
        let operand = match current.kind {
            TokenKind::FunctionName => return Ok(Expression::Function(self.function(current)?)),
            TokenKind::VariableName => Operand::Variable(current.value),
            TokenKind::Literal => Operand::Literal(current.value),
            _ => {
                return Err(syntax("Expected variable, literal, or function", current.span));
            }
        };

        let next = self.next_token()?;
        let function = match next.kind {
            TokenKind::FunctionName => Some(self.function(next)?),
            TokenKind::Punctuator if next.value == "}" => None,
            _ => return Err(syntax("Expected function or }", next.span)),
        };
        Ok(Expression::Operand { operand, function })
    }

    fn function(&mut self, name: Token) -> Result<FunctionExpression, ParseError> {
        let options = self.options()?;
        Ok(FunctionExpression {
            name: name.value,
            options,
        })
    }

    /// Parse `name = value` pairs through the closing `}`.
    fn options(&mut self) -> Result<Options, ParseError> {
        let mut options = Options::new();
        loop {
            let current = self.next_token()?;
            if current.is_punctuator("}") {
                return Ok(options);
            }
            if current.kind != TokenKind::Name {
                return Err(syntax("Expected option name", current.span));
            }
            self.expect_punctuator("=")?;

            let value = self.next_token()?;
            let operand = match value.kind {
                TokenKind::VariableName => Operand::Variable(value.value),
                TokenKind::Literal | TokenKind::Nmtoken => Operand::Literal(value.value),
                _ => return Err(syntax("Expected option value", value.span)),
            };
            if options.contains_key(&current.value) {
                return Err(syntax(
                    format!("Duplicate option name '{}'", current.value),
                    current.span,
                ));
            }
            options.insert(current.value, operand);
        }
    }

    // ------------------------------------------------------------------------
    // Token access.

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.tokens
            .next()
            .ok_or(ParseError::UnexpectedEof { offset: self.end })
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) => Err(syntax("Expected end of input", token.span)),
            None => Ok(()),
        }
    }

    fn expect_kind(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        let token = self.next_token()?;
        if token.kind != kind {
            return Err(syntax(message, token.span));
        }
        Ok(token)
    }

    fn expect_punctuator(&mut self, value: &str) -> Result<Token, ParseError> {
        let token = self.next_token()?;
        if !token.is_punctuator(value) {
            return Err(syntax(format!("Expected {value}"), token.span));
        }
        Ok(token)
    }
}

fn syntax(message: impl Into<String>, span: Range<usize>) -> ParseError {
    ParseError::Syntax {
        message: message.into(),
        span,
    }
}
