use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::{Number, Opaque, Part, PluralSelector, StringValue};
use crate::interpreter::{EvalError, FormattingContext};

/// A value that can be rendered as message output.
pub trait Formattable {
    /// Render the value as a string.
    fn format_to_string(&self, ctx: &FormattingContext<'_>) -> Result<String, EvalError>;

    /// Render the value as an ordered sequence of typed parts.
    ///
    /// Defaults to a single `literal` part holding the string form.
    fn format_to_parts(&self, ctx: &FormattingContext<'_>) -> Result<Vec<Part>, EvalError> {
        Ok(vec![Part::literal(self.format_to_string(ctx)?)])
    }
}

/// A value that can be tested against a variant key.
pub trait Matchable {
    fn matches(&self, ctx: &FormattingContext<'_>, key: &str) -> Result<bool, EvalError>;
}

/// Access to `dyn Any` for downcasting trait objects.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A runtime value: anything a function returns or a caller passes in.
///
/// A value exposes zero, one, or both of the [`Formattable`] and
/// [`Matchable`] capabilities. The interpreter checks the capability before
/// using it, so a selector-only value used as pattern content is a type
/// error rather than a silent no-op.
pub trait RuntimeValue: AsAny + Debug + Send + Sync {
    /// A short name for diagnostics, e.g. `string` or `number`.
    fn type_name(&self) -> &'static str;

    fn as_formattable(&self) -> Option<&dyn Formattable> {
        None
    }

    fn as_matchable(&self) -> Option<&dyn Matchable> {
        None
    }
}

/// A shared handle to a runtime value.
///
/// Cloning is cheap. Values are immutable once created.
///
/// # Example
///
/// ```
/// use msgfmt::Value;
///
/// let count: Value = 42.into();
/// assert_eq!(count.as_number().and_then(|n| n.as_integer()), Some(42));
///
/// let name: Value = "Alice".into();
/// assert_eq!(name.as_str(), Some("Alice"));
/// ```
#[derive(Clone)]
pub struct Value(Arc<dyn RuntimeValue>);

impl Value {
    pub fn new<T: RuntimeValue + 'static>(value: T) -> Self {
        Value(Arc::new(value))
    }

    /// Wrap a host object that should pass through formatting untouched.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::new(Opaque::new(value))
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Get the concrete value, if it has type `T`.
    pub fn downcast_ref<T: RuntimeValue + 'static>(&self) -> Option<&T> {
        AsAny::as_any(&*self.0).downcast_ref::<T>()
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<StringValue>().map(StringValue::as_str)
    }

    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<&Number> {
        self.downcast_ref::<Number>()
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        self.downcast_ref::<Opaque>()
    }

    pub fn as_formattable(&self) -> Option<&dyn Formattable> {
        self.0.as_formattable()
    }

    pub fn as_matchable(&self) -> Option<&dyn Matchable> {
        self.0.as_matchable()
    }

    /// Format to a string, failing if the value is not formattable.
    pub fn format_to_string(&self, ctx: &FormattingContext<'_>) -> Result<String, EvalError> {
        self.formattable()?.format_to_string(ctx)
    }

    /// Format to parts, failing if the value is not formattable.
    pub fn format_to_parts(&self, ctx: &FormattingContext<'_>) -> Result<Vec<Part>, EvalError> {
        self.formattable()?.format_to_parts(ctx)
    }

    /// Match against a variant key, failing if the value is not matchable.
    pub fn matches(&self, ctx: &FormattingContext<'_>, key: &str) -> Result<bool, EvalError> {
        self.as_matchable()
            .ok_or_else(|| EvalError::NotMatchable {
                type_name: self.type_name().to_string(),
            })?
            .matches(ctx, key)
    }

    fn formattable(&self) -> Result<&dyn Formattable, EvalError> {
        self.as_formattable().ok_or_else(|| EvalError::NotFormattable {
            type_name: self.type_name().to_string(),
        })
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

// From implementations for common types. Numbers are stored as `f64`, so
// integers beyond 2^53 (from `i64`, `u64`, or `usize`) are rounded to the
// nearest representable value.

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::new(Number::from(i64::from(n)))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::new(Number::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::new(Number::from(i64::from(n)))
    }
}

/// Rounds values above 2^53.
impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::new(Number::new(n as f64))
    }
}

/// Rounds values above 2^53.
impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::new(Number::new(n as f64))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::new(Number::new(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::new(Number::new(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::new(StringValue::new(s))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::new(StringValue::new(s))
    }
}

impl From<StringValue> for Value {
    fn from(s: StringValue) -> Self {
        Value::new(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::new(n)
    }
}

impl From<PluralSelector> for Value {
    fn from(p: PluralSelector) -> Self {
        Value::new(p)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::new(o)
    }
}
