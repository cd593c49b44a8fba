use crate::functions::number::{number_options, to_number};
use crate::functions::required;
use crate::interpreter::{EvalError, FormattingContext, PluralType, ResolvedOptions};
use crate::types::{PluralSelector, Value};

/// `:plural`: build a selector that matches exact numbers and CLDR plural
/// categories.
///
/// Option `type` is `cardinal` (default) or `ordinal`. The digit options of
/// `:number` are accepted too, since visible fraction digits change the
/// category.
pub fn match_plural(
    _ctx: &FormattingContext<'_>,
    operand: Option<&Value>,
    options: &ResolvedOptions,
) -> Result<Value, EvalError> {
    let number = to_number("plural", required("plural", operand)?)?;
    let plural_type = match options.string("plural", "type")? {
        None => PluralType::default(),
        Some(name) => PluralType::from_name(name).ok_or_else(|| {
            EvalError::invalid_argument("plural", format!("unknown plural type '{name}'"))
        })?,
    };
    let number = number.with_options(number_options("plural", options)?);
    Ok(Value::from(PluralSelector::new(number, plural_type)))
}
