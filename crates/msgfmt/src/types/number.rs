use std::fmt::{self, Display, Formatter};

use bon::Builder;

use super::{Formattable, Matchable, Part, RuntimeValue};
use crate::interpreter::{EvalError, FormattingContext, PluralInput};

/// Fraction digits shown when no maximum is given.
const DEFAULT_MAXIMUM_FRACTION_DIGITS: usize = 3;

/// Largest accepted value for any digit option.
pub const MAX_DIGITS: usize = 100;

/// Digit options for formatting a [`Number`].
///
/// Unset fields fall back to: one integer digit, zero minimum fraction
/// digits, and a maximum of three fraction digits (or the minimum, if
/// larger).
///
/// # Example
///
/// ```
/// use msgfmt::NumberOptions;
///
/// let options = NumberOptions::builder().minimum_fraction_digits(2).build();
/// assert_eq!(options.minimum_fraction_digits, Some(2));
/// assert_eq!(options.maximum_fraction_digits, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct NumberOptions {
    pub minimum_integer_digits: Option<usize>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
}

impl NumberOptions {
    /// Returns these options with every field set in `other` replaced.
    pub fn merge(self, other: NumberOptions) -> NumberOptions {
        NumberOptions {
            minimum_integer_digits: other.minimum_integer_digits.or(self.minimum_integer_digits),
            minimum_fraction_digits: other.minimum_fraction_digits.or(self.minimum_fraction_digits),
            maximum_fraction_digits: other.maximum_fraction_digits.or(self.maximum_fraction_digits),
        }
    }
}

/// A number with digit options.
///
/// Formatting is locale-independent: `.` as the decimal separator and no
/// grouping. The value is an `f64`, so integers beyond 2^53 are rounded to
/// the nearest representable value. Digit options above [`MAX_DIGITS`] are
/// clamped. Output parts are `minusSign`, `integer`, `decimal`, and
/// `fraction`. A number matches a key that parses to the same value.
///
/// # Example
///
/// ```
/// use msgfmt::{Number, NumberOptions};
///
/// let price = Number::builder()
///     .value(4.5)
///     .options(NumberOptions::builder().minimum_fraction_digits(2).build())
///     .build();
/// assert_eq!(price.to_string(), "4.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct Number {
    value: f64,
    #[builder(default)]
    options: NumberOptions,
}

/// The digits of a formatted number.
struct Digits {
    negative: bool,
    integer: String,
    fraction: String,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Number {
            value,
            options: NumberOptions::default(),
        }
    }

    /// Parse a numeric string such as `42` or `-1.5`.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Number::new)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn options(&self) -> NumberOptions {
        self.options
    }

    /// Returns this number with `options` layered over its current options.
    pub fn with_options(self, options: NumberOptions) -> Self {
        Number {
            value: self.value,
            options: self.options.merge(options),
        }
    }

    /// The value as an integer, if it has no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        let in_range = self.value >= i64::MIN as f64 && self.value <= i64::MAX as f64;
        (self.value.fract() == 0.0 && in_range).then_some(self.value as i64)
    }

    /// The number as plural rules see it, after applying digit options.
    pub fn plural_input(&self) -> PluralInput {
        let digits = self.digits();
        if !digits.fraction.is_empty() {
            return PluralInput::Decimal(format!("{}.{}", digits.integer, digits.fraction));
        }
        match digits.integer.parse::<i64>() {
            Ok(integer) => PluralInput::Integer(if digits.negative { -integer } else { integer }),
            Err(_) => PluralInput::Decimal(digits.integer),
        }
    }

    fn digits(&self) -> Digits {
        let minimum_integer = self
            .options
            .minimum_integer_digits
            .unwrap_or(1)
            .min(MAX_DIGITS);
        let minimum_fraction = self
            .options
            .minimum_fraction_digits
            .unwrap_or(0)
            .min(MAX_DIGITS);
        let maximum_fraction = self
            .options
            .maximum_fraction_digits
            .unwrap_or(DEFAULT_MAXIMUM_FRACTION_DIGITS)
            .clamp(minimum_fraction, MAX_DIGITS);

        if self.value.is_nan() {
            return Digits {
                negative: false,
                integer: "NaN".to_string(),
                fraction: String::new(),
            };
        }
        if self.value.is_infinite() {
            return Digits {
                negative: self.value < 0.0,
                integer: "∞".to_string(),
                fraction: String::new(),
            };
        }

        let rounded = format!("{:.*}", maximum_fraction, self.value.abs());
        let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < minimum_fraction {
            fraction.push('0');
        }
        let nonzero = integer.bytes().chain(fraction.bytes()).any(|b| b != b'0');

        Digits {
            negative: self.value < 0.0 && nonzero,
            integer: format!("{integer:0>minimum_integer$}"),
            fraction,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::new(n as f64)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits = self.digits();
        if digits.negative {
            f.write_str("-")?;
        }
        f.write_str(&digits.integer)?;
        if !digits.fraction.is_empty() {
            write!(f, ".{}", digits.fraction)?;
        }
        Ok(())
    }
}

impl Formattable for Number {
    fn format_to_string(&self, _ctx: &FormattingContext<'_>) -> Result<String, EvalError> {
        Ok(self.to_string())
    }

    fn format_to_parts(&self, _ctx: &FormattingContext<'_>) -> Result<Vec<Part>, EvalError> {
        let digits = self.digits();
        let mut parts = Vec::with_capacity(4);
        if digits.negative {
            parts.push(Part::new("minusSign", "-"));
        }
        parts.push(Part::new("integer", digits.integer));
        if !digits.fraction.is_empty() {
            parts.push(Part::new("decimal", "."));
            parts.push(Part::new("fraction", digits.fraction));
        }
        Ok(parts)
    }
}

impl Matchable for Number {
    fn matches(&self, _ctx: &FormattingContext<'_>, key: &str) -> Result<bool, EvalError> {
        Ok(key.parse::<f64>().is_ok_and(|key| key == self.value))
    }
}

impl RuntimeValue for Number {
    fn type_name(&self) -> &'static str {
        "number"
    }

    fn as_formattable(&self) -> Option<&dyn Formattable> {
        Some(self)
    }

    fn as_matchable(&self) -> Option<&dyn Matchable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(value: f64, options: NumberOptions) -> String {
        Number::new(value).with_options(options).to_string()
    }

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format(42.0, NumberOptions::default()), "42");
        assert_eq!(format(-7.0, NumberOptions::default()), "-7");
    }

    #[test]
    fn fraction_defaults_to_three_digits() {
        assert_eq!(format(3.14159, NumberOptions::default()), "3.142");
        assert_eq!(format(0.5, NumberOptions::default()), "0.5");
    }

    #[test]
    fn minimum_digits_pad() {
        let options = NumberOptions::builder()
            .minimum_integer_digits(3)
            .minimum_fraction_digits(2)
            .build();
        assert_eq!(format(7.0, options), "007.00");
    }

    #[test]
    fn maximum_fraction_digits_rounds() {
        let options = NumberOptions::builder().maximum_fraction_digits(0).build();
        assert_eq!(format(2.75, options), "3");
    }

    #[test]
    fn negative_zero_after_rounding_has_no_sign() {
        let options = NumberOptions::builder().maximum_fraction_digits(1).build();
        assert_eq!(format(-0.01, options), "0");
    }

    #[test]
    fn plural_input_reflects_visible_digits() {
        let one = Number::new(1.0);
        assert_eq!(one.plural_input(), PluralInput::Integer(1));
        let one_point_zero =
            one.with_options(NumberOptions::builder().minimum_fraction_digits(1).build());
        assert_eq!(one_point_zero.plural_input(), PluralInput::Decimal("1.0".into()));
    }

    #[test]
    fn plural_input_beyond_i64_keeps_integer_digits() {
        assert_eq!(
            Number::new(1e20).plural_input(),
            PluralInput::Decimal("100000000000000000000".into())
        );
    }

    #[test]
    fn oversized_digit_options_are_clamped() {
        let options = NumberOptions::builder()
            .minimum_integer_digits(70_000)
            .maximum_fraction_digits(70_000)
            .build();
        let formatted = format(1.5, options);
        assert_eq!(formatted.split_once('.').map(|(int, _)| int.len()), Some(MAX_DIGITS));
        assert!(formatted.ends_with(".5"));
    }

    #[test]
    fn merge_prefers_later_options() {
        let base = NumberOptions::builder()
            .minimum_fraction_digits(1)
            .maximum_fraction_digits(4)
            .build();
        let merged = base.merge(NumberOptions::builder().minimum_fraction_digits(2).build());
        assert_eq!(merged.minimum_fraction_digits, Some(2));
        assert_eq!(merged.maximum_fraction_digits, Some(4));
    }
}
