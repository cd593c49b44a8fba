//! Expression resolution, variant selection, and pattern rendering.
//!
//! A formatting call binds declarations in order, selects the first variant
//! whose keys all match the resolved selectors, and renders that variant's
//! pattern left to right. The first error aborts the call.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::interpreter::EvalError;
use crate::interpreter::context::FormattingContext;
use crate::interpreter::registry::{ResolvedOptions, Role};
use crate::parser::ast::{
    Declaration, Expression, FunctionExpression, Message, Operand, Options, Pattern,
    PatternElement, Variant, VariantKey,
};
use crate::types::{Part, StringValue, Value};

impl FormattingContext<'_> {
    /// Resolve a literal or variable reference.
    pub fn resolve_operand(&self, operand: &Operand) -> Result<Value, EvalError> {
        match operand {
            Operand::Literal(value) => Ok(Value::new(StringValue::new(value.as_str()))),
            Operand::Variable(name) => self.variable(name).cloned(),
        }
    }

    /// Resolve every option value against this context.
    pub fn resolve_options(&self, options: &Options) -> Result<ResolvedOptions, EvalError> {
        let mut resolved = ResolvedOptions::new();
        for (name, operand) in options {
            resolved.insert(name.as_str(), self.resolve_operand(operand)?);
        }
        Ok(resolved)
    }

    /// Resolve an expression to a runtime value.
    ///
    /// A bare operand resolves to itself. A function annotation is looked up
    /// in the registry for `role` before its operand and options are
    /// resolved, then invoked with them.
    pub fn resolve_expression(
        &self,
        expression: &Expression,
        role: Role,
    ) -> Result<Value, EvalError> {
        match expression {
            Expression::Operand {
                operand,
                function: None,
            } => self.resolve_operand(operand),
            Expression::Operand {
                operand,
                function: Some(function),
            } => self.call(function, Some(operand), role),
            Expression::Function(function) => self.call(function, None, role),
        }
    }

    fn call(
        &self,
        function: &FunctionExpression,
        operand: Option<&Operand>,
        role: Role,
    ) -> Result<Value, EvalError> {
        let callable = self.registry().lookup(&function.name, role)?;
        let operand = operand
            .map(|operand| self.resolve_operand(operand))
            .transpose()?;
        let options = self.resolve_options(&function.options)?;
        trace!(name = %function.name, ?role, "calling function");
        callable(self, operand.as_ref(), &options)
    }

    /// Evaluate declarations in order, binding each into the local scope.
    ///
    /// Each declaration sees the ones before it.
    pub fn bind_declarations(&mut self, declarations: &[Declaration]) -> Result<(), EvalError> {
        for declaration in declarations {
            let value = self.resolve_expression(&declaration.expression, Role::Format)?;
            debug!(name = %declaration.name, type_name = value.type_name(), "bound declaration");
            self.bind(declaration.name.as_str(), value);
        }
        Ok(())
    }

    /// Select the variant to render.
    ///
    /// Selectors are resolved once, in order. Variants are tried in source
    /// order and the first whose every key matches wins; `*` matches any
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NoVariantMatched`] if no variant matches, and
    /// [`EvalError::NotMatchable`] if a selector resolves to a value that
    /// cannot be matched.
    pub fn select_variant<'m>(&self, message: &'m Message) -> Result<&'m Variant, EvalError> {
        let mut selectors = Vec::with_capacity(message.selectors.len());
        for expression in &message.selectors {
            let value = self.resolve_expression(expression, Role::Match)?;
            if value.as_matchable().is_none() {
                return Err(EvalError::NotMatchable {
                    type_name: value.type_name().to_string(),
                });
            }
            selectors.push(value);
        }

        'variants: for (index, variant) in message.variants.iter().enumerate() {
            for (key, selector) in variant.keys.iter().zip(&selectors) {
                if let VariantKey::Literal(key) = key
                    && !selector.matches(self, key)?
                {
                    continue 'variants;
                }
            }
            debug!(index, "selected variant");
            return Ok(variant);
        }

        Err(EvalError::NoVariantMatched)
    }

    /// Render a pattern to a string. Markup renders as nothing.
    pub fn render_to_string(&self, pattern: &Pattern) -> Result<String, EvalError> {
        let mut output = String::new();
        for element in &pattern.elements {
            match element {
                PatternElement::Text(text) => output.push_str(text),
                PatternElement::Expression(expression) => {
                    let value = self.resolve_expression(expression, Role::Format)?;
                    output.push_str(&value.format_to_string(self)?);
                }
                PatternElement::MarkupOpen(_) | PatternElement::MarkupClose(_) => {}
            }
        }
        Ok(output)
    }

    /// Render a pattern to parts, flattening each element's parts in order.
    pub fn render_to_parts(&self, pattern: &Pattern) -> Result<Vec<Part>, EvalError> {
        let mut parts = Vec::new();
        for element in &pattern.elements {
            match element {
                PatternElement::Text(text) => parts.push(Part::literal(text.as_str())),
                PatternElement::Expression(expression) => {
                    let value = self.resolve_expression(expression, Role::Format)?;
                    parts.extend(value.format_to_parts(self)?);
                }
                PatternElement::MarkupOpen(markup) => {
                    let mut options = BTreeMap::new();
                    for (name, value) in self.resolve_options(&markup.options)?.iter() {
                        options.insert(name.to_string(), value.format_to_string(self)?);
                    }
                    parts.push(Part::MarkupOpen {
                        name: markup.name.clone(),
                        options,
                    });
                }
                PatternElement::MarkupClose(markup) => parts.push(Part::MarkupClose {
                    name: markup.name.clone(),
                }),
            }
        }
        Ok(parts)
    }
}

/// Format `message` to a string: bind declarations, select, render.
pub fn format_message(
    ctx: &mut FormattingContext<'_>,
    message: &Message,
) -> Result<String, EvalError> {
    ctx.bind_declarations(&message.declarations)?;
    let variant = ctx.select_variant(message)?;
    ctx.render_to_string(&variant.pattern)
}

/// Format `message` to an ordered sequence of parts.
pub fn format_message_to_parts(
    ctx: &mut FormattingContext<'_>,
    message: &Message,
) -> Result<Vec<Part>, EvalError> {
    ctx.bind_declarations(&message.declarations)?;
    let variant = ctx.select_variant(message)?;
    ctx.render_to_parts(&variant.pattern)
}
