use crate::functions::{apply_lettercase, required};
use crate::interpreter::{EvalError, FormattingContext, ResolvedOptions};
use crate::types::{StringValue, Value};

/// `:string`: format the operand to text, optionally changing its case.
///
/// Option `lettercase` is `capitalized`, `uppercase`, or `lowercase`.
pub fn format_string(
    ctx: &FormattingContext<'_>,
    operand: Option<&Value>,
    options: &ResolvedOptions,
) -> Result<Value, EvalError> {
    let text = required("string", operand)?.format_to_string(ctx)?;
    let lettercase = options.string("string", "lettercase")?;
    let text = apply_lettercase("string", &text, lettercase, ctx.locale())?;
    Ok(Value::new(StringValue::new(text)))
}

/// `:equals` and `:choose`: select on a string by exact equality.
pub fn match_equals(
    _ctx: &FormattingContext<'_>,
    operand: Option<&Value>,
    _options: &ResolvedOptions,
) -> Result<Value, EvalError> {
    let value = required("equals", operand)?;
    if value.as_str().is_none() {
        return Err(EvalError::invalid_argument(
            "equals",
            format!("expected a string, got {}", value.type_name()),
        ));
    }
    Ok(value.clone())
}
