//! Built-in functions.
//!
//! | Name | Role | Result |
//! |------|------|--------|
//! | `:number` | formatter | [`Number`](crate::Number) with digit options |
//! | `:plural` | matcher | [`PluralSelector`](crate::PluralSelector) |
//! | `:equals`, `:choose` | matcher | the string operand itself |
//! | `:string` | formatter | the operand as text, with `lettercase` |
//! | `:term` | formatter | a glossary form, with `lettercase` |
//!
//! `:term` needs a glossary and is registered separately with
//! [`register_term`].

mod number;
mod plural;
mod string;
mod term;

use crate::interpreter::{EvalError, FunctionRegistry};
use crate::text::{capitalize, lowercase, uppercase};
use crate::types::Value;

pub use number::format_number;
pub use plural::match_plural;
pub use string::{format_string, match_equals};
pub use term::register_term;

/// Register every built-in function that needs no external data.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register_formatter("number", format_number);
    registry.register_matcher("plural", match_plural);
    registry.register_matcher("equals", match_equals);
    registry.register_matcher("choose", match_equals);
    registry.register_formatter("string", format_string);
}

/// Unwrap a required operand.
fn required<'v>(function: &str, operand: Option<&'v Value>) -> Result<&'v Value, EvalError> {
    operand.ok_or_else(|| EvalError::MissingArgument {
        function: function.to_string(),
    })
}

/// Apply a `lettercase` option value to `text`.
fn apply_lettercase(
    function: &str,
    text: &str,
    lettercase: Option<&str>,
    locale: &str,
) -> Result<String, EvalError> {
    match lettercase {
        None => Ok(text.to_string()),
        Some("capitalized") => Ok(capitalize(text, locale)),
        Some("uppercase") => Ok(uppercase(text, locale)),
        Some("lowercase") => Ok(lowercase(text, locale)),
        Some(other) => Err(EvalError::invalid_argument(
            function,
            format!("unknown lettercase '{other}'"),
        )),
    }
}
