use std::fmt::{self, Display, Formatter};

use super::{Formattable, Matchable, RuntimeValue};
use crate::interpreter::{EvalError, FormattingContext};

/// Plain text: pattern text, literals, and string arguments.
///
/// Formats as a single `literal` part and matches a key by equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringValue {
    value: String,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        StringValue {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl Display for StringValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Formattable for StringValue {
    fn format_to_string(&self, _ctx: &FormattingContext<'_>) -> Result<String, EvalError> {
        Ok(self.value.clone())
    }
}

impl Matchable for StringValue {
    fn matches(&self, _ctx: &FormattingContext<'_>, key: &str) -> Result<bool, EvalError> {
        Ok(self.value == key)
    }
}

impl RuntimeValue for StringValue {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn as_formattable(&self) -> Option<&dyn Formattable> {
        Some(self)
    }

    fn as_matchable(&self) -> Option<&dyn Matchable> {
        Some(self)
    }
}
