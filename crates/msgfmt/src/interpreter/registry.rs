//! Named function registry.
//!
//! Functions are stored in two independent tables: formatters, used for
//! pattern content and declarations, and matchers, used for selectors. A
//! name resolves only in the table for its role; register a function under
//! both roles to use it in both positions.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tracing::trace;

use crate::functions::register_builtins;
use crate::interpreter::context::FormattingContext;
use crate::interpreter::error::{EvalError, compute_suggestions};
use crate::types::Value;

/// A registered function.
///
/// Receives the formatting context, the resolved operand (if the expression
/// has one), and the resolved options.
pub type Function = Arc<
    dyn Fn(&FormattingContext<'_>, Option<&Value>, &ResolvedOptions) -> Result<Value, EvalError>
        + Send
        + Sync,
>;

/// The position an expression occupies, which decides the table searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Pattern content and declaration right-hand sides.
    Format,
    /// `match` selectors.
    Match,
}

/// A registry of formatting and matching functions.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    formatters: HashMap<String, Function>,
    matchers: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register a formatter. Re-registering a name replaces the function.
    pub fn register_formatter<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&FormattingContext<'_>, Option<&Value>, &ResolvedOptions) -> Result<Value, EvalError>
            + Send
            + Sync
            + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(function));
    }

    /// Register a matcher. Re-registering a name replaces the function.
    pub fn register_matcher<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&FormattingContext<'_>, Option<&Value>, &ResolvedOptions) -> Result<Value, EvalError>
            + Send
            + Sync
            + 'static,
    {
        self.matchers.insert(name.into(), Arc::new(function));
    }

    pub fn formatter(&self, name: &str) -> Option<&Function> {
        self.formatters.get(name)
    }

    pub fn matcher(&self, name: &str) -> Option<&Function> {
        self.matchers.get(name)
    }

    /// Look up `name` in the table for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownFunction`] if the table for `role` has no
    /// such name, even when the other table does. Suggestions are drawn from
    /// both tables.
    pub fn lookup(&self, name: &str, role: Role) -> Result<&Function, EvalError> {
        let table = match role {
            Role::Format => &self.formatters,
            Role::Match => &self.matchers,
        };
        if let Some(function) = table.get(name) {
            trace!(name, ?role, "resolved function");
            return Ok(function);
        }
        let available = self.function_names();
        Err(EvalError::UnknownFunction {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &available),
        })
    }

    /// All registered names across both tables, sorted and deduplicated.
    pub fn function_names(&self) -> Vec<String> {
        self.formatters
            .keys()
            .chain(self.matchers.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Debug for FunctionRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("formatters", &self.formatters.keys().collect::<BTreeSet<_>>())
            .field("matchers", &self.matchers.keys().collect::<BTreeSet<_>>())
            .finish()
    }
}

/// Function options after resolving each value against the context.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    values: BTreeMap<String, Value>,
}

impl ResolvedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Get a string-valued option.
    ///
    /// Returns `Ok(None)` if the option is absent and an error naming
    /// `function` if the option is present but not a string.
    pub fn string(&self, function: &str, name: &str) -> Result<Option<&str>, EvalError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => value.as_str().map(Some).ok_or_else(|| {
                EvalError::invalid_argument(
                    function,
                    format!("option '{name}' must be a string, got {}", value.type_name()),
                )
            }),
        }
    }

    /// Get a non-negative integer option such as a digit count.
    ///
    /// Accepts an nmtoken like `2` or a variable bound to an integral number.
    pub fn digits(&self, function: &str, name: &str) -> Result<Option<usize>, EvalError> {
        let Some(value) = self.values.get(name) else {
            return Ok(None);
        };
        let parsed = match (value.as_str(), value.as_number()) {
            (Some(text), _) => text.parse::<usize>().ok(),
            (None, Some(number)) => number.as_integer().and_then(|n| usize::try_from(n).ok()),
            (None, None) => None,
        };
        parsed.map(Some).ok_or_else(|| {
            EvalError::invalid_argument(
                function,
                format!("option '{name}' must be a non-negative integer"),
            )
        })
    }
}
