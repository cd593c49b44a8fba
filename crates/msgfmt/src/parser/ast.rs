//! Public AST types for parsed messages.
//!
//! These types are public to enable external tooling (linters, printers,
//! and the CLI's AST dump). A parsed [`Message`] is immutable and can be
//! shared read-only across concurrent formatting calls.

use std::collections::BTreeMap;

use serde::Serialize;

/// A parsed message: local declarations, selectors, and variants.
///
/// A message without selectors has exactly one variant with no keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub declarations: Vec<Declaration>,
    pub selectors: Vec<Expression>,
    pub variants: Vec<Variant>,
}

/// A local declaration: `let $name = {expression}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub expression: Expression,
}

/// One `when` clause: a key per selector and the pattern to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub keys: Vec<VariantKey>,
    pub pattern: Pattern,
}

/// A variant key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKey {
    /// Matches when the selector's value matches this literal.
    Literal(String),
    /// `*`, matches any selector value.
    Asterisk,
}

/// An ordered sequence of text and placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

/// An element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternElement {
    /// Literal text, with escapes already removed.
    Text(String),
    /// A placeholder `{...}` holding an expression.
    Expression(Expression),
    /// `{+name opt=val}`
    MarkupOpen(MarkupOpen),
    /// `{-name}`
    MarkupClose(MarkupClose),
}

/// An expression inside `{...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// `{$var}`, `{(literal)}`, or either followed by a function annotation.
    Operand {
        operand: Operand,
        function: Option<FunctionExpression>,
    },
    /// `{:func opt=val}` with no operand.
    Function(FunctionExpression),
}

/// A literal or a variable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(String),
    Variable(String),
}

/// A function call: name plus named options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionExpression {
    pub name: String,
    pub options: Options,
}

/// Option name to value. Order carries no meaning.
pub type Options = BTreeMap<String, Operand>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupOpen {
    pub name: String,
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupClose {
    pub name: String,
}

impl Message {
    /// Returns true if the message has no selectors.
    pub fn is_plain(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl Expression {
    /// Convenience constructor for `{$name}`.
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Operand {
            operand: Operand::Variable(name.into()),
            function: None,
        }
    }

    /// Convenience constructor for `{(value)}`.
    pub fn literal(value: impl Into<String>) -> Self {
        Expression::Operand {
            operand: Operand::Literal(value.into()),
            function: None,
        }
    }

    /// The function annotation of this expression, if any.
    pub fn function(&self) -> Option<&FunctionExpression> {
        match self {
            Expression::Operand { function, .. } => function.as_ref(),
            Expression::Function(function) => Some(function),
        }
    }
}

impl FunctionExpression {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionExpression {
            name: name.into(),
            options: Options::new(),
        }
    }

    /// Builder-style option insertion.
    pub fn with_option(mut self, name: impl Into<String>, value: Operand) -> Self {
        self.options.insert(name.into(), value);
        self
    }
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>) -> Self {
        Pattern { elements }
    }
}
