//! Canonical source printer.
//!
//! `Display` for the AST prints message source that parses back to an equal
//! tree. Declarations and variants go on their own lines; literals that are
//! valid nmtokens print bare as variant keys and option values.

use std::fmt::{self, Display, Formatter, Write};

use crate::parser::ast::{
    Declaration, Expression, FunctionExpression, MarkupClose, MarkupOpen, Message, Operand,
    Options, Pattern, PatternElement, Variant, VariantKey,
};
use crate::parser::names::is_nmtoken;

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for declaration in &self.declarations {
            writeln!(f, "{declaration}")?;
        }

        if self.selectors.is_empty() {
            // A plain message has exactly one keyless variant.
            return match self.variants.first() {
                Some(variant) => write!(f, "{{{}}}", variant.pattern),
                None => f.write_str("{}"),
            };
        }

        f.write_str("match")?;
        for selector in &self.selectors {
            write!(f, " {{{selector}}}")?;
        }
        for variant in &self.variants {
            write!(f, "\n{variant}")?;
        }
        Ok(())
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "let ${} = {{{}}}", self.name, self.expression)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("when")?;
        for key in &self.keys {
            write!(f, " {key}")?;
        }
        write!(f, " {{{}}}", self.pattern)
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Asterisk => f.write_char('*'),
            VariantKey::Literal(value) => write_bare_or_quoted(f, value),
        }
    }
}

/// Prints the pattern body without its enclosing braces.
impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

impl Display for PatternElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::Text(text) => write_escaped(f, text, &['{', '}']),
            PatternElement::Expression(expression) => write!(f, "{{{expression}}}"),
            PatternElement::MarkupOpen(markup) => write!(f, "{{{markup}}}"),
            PatternElement::MarkupClose(markup) => write!(f, "{{{markup}}}"),
        }
    }
}

/// Prints the expression body without its enclosing braces.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Operand { operand, function } => {
                write!(f, "{operand}")?;
                if let Some(function) = function {
                    write!(f, " {function}")?;
                }
                Ok(())
            }
            Expression::Function(function) => write!(f, "{function}"),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(name) => write!(f, "${name}"),
            Operand::Literal(value) => write_quoted(f, value),
        }
    }
}

impl Display for FunctionExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)?;
        write_options(f, &self.options)
    }
}

impl Display for MarkupOpen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.name)?;
        write_options(f, &self.options)
    }
}

impl Display for MarkupClose {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.name)
    }
}

fn write_options(f: &mut Formatter<'_>, options: &Options) -> fmt::Result {
    for (name, value) in options {
        write!(f, " {name}=")?;
        match value {
            Operand::Variable(variable) => write!(f, "${variable}")?,
            Operand::Literal(literal) => write_bare_or_quoted(f, literal)?,
        }
    }
    Ok(())
}

fn write_bare_or_quoted(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    if is_nmtoken(value) {
        f.write_str(value)
    } else {
        write_quoted(f, value)
    }
}

fn write_quoted(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('(')?;
    write_escaped(f, value, &['(', ')'])?;
    f.write_char(')')
}

/// Write `text`, prefixing a backslash to itself and to each of `special`.
fn write_escaped(f: &mut Formatter<'_>, text: &str, special: &[char]) -> fmt::Result {
    for c in text.chars() {
        if c == '\\' || special.contains(&c) {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}
