//! CLDR plural category resolution.
//!
//! Categories come from `icu_plurals` compiled data. Rules are cached per
//! thread per (locale, rule type) so repeated selections reuse the same
//! `PluralRules` instance. Integers are categorized directly; numbers with
//! visible fraction digits are categorized from their formatted digits so
//! that `1.0` and `1` can fall into different categories.

use std::cell::RefCell;

use icu_locale_core::Locale;
use fixed_decimal::UnsignedDecimal;
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};

use crate::interpreter::EvalError;

/// The kind of plural rules to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PluralType {
    /// Quantity: "1 apple", "2 apples".
    #[default]
    Cardinal,
    /// Position: "1st", "2nd", "3rd".
    Ordinal,
}

impl PluralType {
    /// Parse the value of a `type=` option.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cardinal" => Some(PluralType::Cardinal),
            "ordinal" => Some(PluralType::Ordinal),
            _ => None,
        }
    }

    fn rule_type(self) -> PluralRuleType {
        match self {
            PluralType::Cardinal => PluralRuleType::Cardinal,
            PluralType::Ordinal => PluralRuleType::Ordinal,
        }
    }
}

/// A number as seen by plural rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralInput {
    /// A value with no visible fraction digits.
    Integer(i64),
    /// Formatted decimal digits such as `1.50`, without a sign. Integers too
    /// large for `i64` appear here without a fraction.
    Decimal(String),
}

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale tag and rule type.
    static PLURAL_RULES_CACHE: RefCell<Vec<((String, PluralType), PluralRules)>> =
        const { RefCell::new(Vec::new()) };
}

/// Get the CLDR plural category for `input` in `locale`.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other".
///
/// # Errors
///
/// Returns [`EvalError::UnsupportedLocale`] if the locale tag cannot be
/// parsed or has no plural data, and [`EvalError::InvalidArgument`] if the
/// decimal digits are malformed.
///
/// # Examples
///
/// ```
/// use msgfmt::interpreter::{PluralInput, PluralType, plural_category};
///
/// assert_eq!(plural_category("en", PluralType::Cardinal, &PluralInput::Integer(1)).unwrap(), "one");
/// assert_eq!(plural_category("ru", PluralType::Cardinal, &PluralInput::Integer(2)).unwrap(), "few");
/// assert_eq!(plural_category("en", PluralType::Ordinal, &PluralInput::Integer(3)).unwrap(), "few");
/// ```
pub fn plural_category(
    locale: &str,
    plural_type: PluralType,
    input: &PluralInput,
) -> Result<&'static str, EvalError> {
    let operands = match input {
        PluralInput::Integer(n) => PluralOperands::from(*n),
        PluralInput::Decimal(digits) => {
            let decimal = UnsignedDecimal::try_from_str(digits).map_err(|_| {
                EvalError::invalid_argument("plural", format!("'{digits}' is not a decimal number"))
            })?;
            PluralOperands::from(&decimal)
        }
    };

    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache
            .iter()
            .find(|((tag, kind), _)| tag == locale && *kind == plural_type)
        {
            return Ok(category_str(rules.category_for(operands)));
        }
        let rules = build_rules(locale, plural_type)?;
        let category = category_str(rules.category_for(operands));
        cache.push(((locale.to_string(), plural_type), rules));
        Ok(category)
    })
}

fn build_rules(locale: &str, plural_type: PluralType) -> Result<PluralRules, EvalError> {
    let unsupported = || EvalError::UnsupportedLocale {
        locale: locale.to_string(),
    };
    let parsed = Locale::try_from_str(locale).map_err(|_| unsupported())?;
    PluralRules::try_new(parsed.into(), plural_type.rule_type().into()).map_err(|_| unsupported())
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(locale: &str, input: PluralInput) -> &'static str {
        plural_category(locale, PluralType::Cardinal, &input).unwrap()
    }

    #[test]
    fn visible_fraction_digits_change_category() {
        assert_eq!(category("en", PluralInput::Integer(1)), "one");
        assert_eq!(category("en", PluralInput::Decimal("1.0".into())), "other");
    }

    #[test]
    fn integers_beyond_i64_are_categorized() {
        let huge = PluralInput::Decimal("100000000000000000000".into());
        assert_eq!(category("en", huge), "other");
    }

    #[test]
    fn polish_integers() {
        assert_eq!(category("pl", PluralInput::Integer(1)), "one");
        assert_eq!(category("pl", PluralInput::Integer(3)), "few");
        assert_eq!(category("pl", PluralInput::Integer(5)), "many");
    }

    #[test]
    fn rules_are_cached_per_type() {
        let ordinal = plural_category("en", PluralType::Ordinal, &PluralInput::Integer(2)).unwrap();
        let cardinal = plural_category("en", PluralType::Cardinal, &PluralInput::Integer(2)).unwrap();
        assert_eq!(ordinal, "two");
        assert_eq!(cardinal, "other");
    }

    #[test]
    fn malformed_locale_is_rejected() {
        let err = plural_category("not a locale!", PluralType::Cardinal, &PluralInput::Integer(1))
            .unwrap_err();
        assert!(matches!(err, EvalError::UnsupportedLocale { .. }));
    }
}
