use std::sync::Arc;

use crate::functions::{apply_lettercase, required};
use crate::glossary::Glossary;
use crate::interpreter::{EvalError, FormattingContext, FunctionRegistry, ResolvedOptions};
use crate::types::{StringValue, Value};

/// Form used when no `form` option is given.
const CANONICAL_FORM: &str = "canonical";

/// Register `:term`, backed by `glossary`.
///
/// `{$item :term form=plural lettercase=capitalized}` looks up the term
/// named by the operand in the formatting locale's glossary, picks the
/// requested form (default `canonical`), and applies `lettercase`.
pub fn register_term(registry: &mut FunctionRegistry, glossary: Arc<Glossary>) {
    registry.register_formatter("term", move |ctx, operand, options| {
        format_term(&glossary, ctx, operand, options)
    });
}

fn format_term(
    glossary: &Glossary,
    ctx: &FormattingContext<'_>,
    operand: Option<&Value>,
    options: &ResolvedOptions,
) -> Result<Value, EvalError> {
    let operand = required("term", operand)?;
    let name = operand.as_str().ok_or_else(|| {
        EvalError::invalid_argument(
            "term",
            format!("expected a term name, got {}", operand.type_name()),
        )
    })?;
    let term = glossary
        .lookup(ctx.locale(), name)
        .ok_or_else(|| EvalError::UnknownTerm {
            term: name.to_string(),
            locale: ctx.locale().to_string(),
        })?;

    let form = options.string("term", "form")?.unwrap_or(CANONICAL_FORM);
    let text = term.get(form).ok_or_else(|| {
        EvalError::invalid_argument("term", format!("term '{name}' has no form '{form}'"))
    })?;

    let lettercase = options.string("term", "lettercase")?;
    let text = apply_lettercase("term", text, lettercase, ctx.locale())?;
    Ok(Value::new(StringValue::new(text)))
}
