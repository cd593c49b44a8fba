use crate::functions::required;
use crate::interpreter::{EvalError, FormattingContext, ResolvedOptions};
use crate::types::{MAX_DIGITS, Number, NumberOptions, PluralSelector, Value};

/// `:number`: format a number or numeric string.
///
/// Options `minimumIntegerDigits`, `minimumFractionDigits`, and
/// `maximumFractionDigits` take non-negative integers and are layered over
/// any options the operand already carries.
pub fn format_number(
    _ctx: &FormattingContext<'_>,
    operand: Option<&Value>,
    options: &ResolvedOptions,
) -> Result<Value, EvalError> {
    let number = to_number("number", required("number", operand)?)?;
    let digits = number_options("number", options)?;
    Ok(Value::from(number.with_options(digits)))
}

/// Read the digit options shared by `:number` and `:plural`.
///
/// Each option must be at most [`MAX_DIGITS`].
pub(crate) fn number_options(
    function: &str,
    options: &ResolvedOptions,
) -> Result<NumberOptions, EvalError> {
    let digits = |name: &str| -> Result<Option<usize>, EvalError> {
        let value = options.digits(function, name)?;
        match value {
            Some(value) if value > MAX_DIGITS => Err(EvalError::OptionOutOfRange {
                function: function.to_string(),
                option: name.to_string(),
                value,
                max: MAX_DIGITS,
            }),
            _ => Ok(value),
        }
    };
    Ok(NumberOptions::builder()
        .maybe_minimum_integer_digits(digits("minimumIntegerDigits")?)
        .maybe_minimum_fraction_digits(digits("minimumFractionDigits")?)
        .maybe_maximum_fraction_digits(digits("maximumFractionDigits")?)
        .build())
}

/// Coerce an operand to a number.
///
/// Accepts numbers, numeric strings, and plural selectors (which carry the
/// number they were built from).
pub(crate) fn to_number(function: &str, value: &Value) -> Result<Number, EvalError> {
    if let Some(number) = value.as_number() {
        return Ok(*number);
    }
    if let Some(plural) = value.downcast_ref::<PluralSelector>() {
        return Ok(*plural.number());
    }
    if let Some(text) = value.as_str() {
        return Number::parse(text).ok_or_else(|| {
            EvalError::invalid_argument(function, format!("'{text}' is not a number"))
        });
    }
    Err(EvalError::invalid_argument(
        function,
        format!("expected a number, got {}", value.type_name()),
    ))
}
