//! Formatting context for a single `format` call.

use std::collections::HashMap;

use crate::interpreter::EvalError;
use crate::interpreter::registry::FunctionRegistry;
use crate::types::Value;

/// External arguments passed to a formatting call.
pub type Args = HashMap<String, Value>;

/// Resolution state for one formatting call.
///
/// The context carries:
/// - The locale tag the message is formatted for
/// - External arguments supplied by the caller
/// - Local declarations bound so far, which shadow arguments of the same name
/// - The function registry used to resolve annotations
pub struct FormattingContext<'a> {
    locale: &'a str,
    args: &'a Args,
    locals: HashMap<String, Value>,
    registry: &'a FunctionRegistry,
}

impl<'a> FormattingContext<'a> {
    /// Create a context with no local declarations bound.
    pub fn new(locale: &'a str, args: &'a Args, registry: &'a FunctionRegistry) -> Self {
        Self {
            locale,
            args,
            locals: HashMap::new(),
            registry,
        }
    }

    /// The full locale tag, e.g. `en-US`.
    pub fn locale(&self) -> &str {
        self.locale
    }

    /// The language subtag of the locale, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        self.locale
            .split(['-', '_'])
            .next()
            .unwrap_or(self.locale)
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.registry
    }

    /// Look up a variable, checking local declarations before arguments.
    pub fn variable(&self, name: &str) -> Result<&Value, EvalError> {
        self.locals
            .get(name)
            .or_else(|| self.args.get(name))
            .ok_or_else(|| EvalError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Bind a local declaration, shadowing any argument of the same name.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.locals.insert(name.into(), value);
    }
}
