use super::{Matchable, Number, RuntimeValue};
use crate::interpreter::{EvalError, FormattingContext, PluralType, plural_category};

/// The result of `:plural`: a number paired with the rules to categorize it.
///
/// Selector-only. A key matches if it equals the number exactly, or else if
/// it names the number's CLDR plural category in the formatting locale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralSelector {
    number: Number,
    plural_type: PluralType,
}

impl PluralSelector {
    pub fn new(number: Number, plural_type: PluralType) -> Self {
        PluralSelector {
            number,
            plural_type,
        }
    }

    pub fn number(&self) -> &Number {
        &self.number
    }

    pub fn plural_type(&self) -> PluralType {
        self.plural_type
    }

    /// The plural category of the number in `ctx`'s locale.
    pub fn category(&self, ctx: &FormattingContext<'_>) -> Result<&'static str, EvalError> {
        plural_category(ctx.locale(), self.plural_type, &self.number.plural_input())
    }
}

impl Matchable for PluralSelector {
    fn matches(&self, ctx: &FormattingContext<'_>, key: &str) -> Result<bool, EvalError> {
        if self.number.matches(ctx, key)? {
            return Ok(true);
        }
        Ok(self.category(ctx)? == key)
    }
}

impl RuntimeValue for PluralSelector {
    fn type_name(&self) -> &'static str {
        "plural"
    }

    fn as_matchable(&self) -> Option<&dyn Matchable> {
        Some(self)
    }
}
