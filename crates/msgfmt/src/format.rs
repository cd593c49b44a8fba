//! Formatting façade.

use std::sync::Arc;

use tracing::instrument;

use crate::global;
use crate::interpreter::{
    Args, EvalError, FormattingContext, FunctionRegistry, format_message, format_message_to_parts,
};
use crate::parser::{Message, ParseError, parse_message};
use crate::types::Part;

/// A parsed message bound to a locale.
///
/// Parsing happens once, in the constructor. Formatting is independent per
/// call and may run concurrently from many threads with different
/// arguments.
///
/// # Example
///
/// ```
/// use msgfmt::{MessageFormat, args};
///
/// let message = MessageFormat::new("en-US", "{Hello, {$userName}!}").unwrap();
/// assert_eq!(message.format(&args! { "userName" => "Alice" }).unwrap(), "Hello, Alice!");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFormat {
    locale: String,
    source: String,
    message: Message,
    /// Functions to resolve against; `None` uses the global registry.
    registry: Option<Arc<FunctionRegistry>>,
}

impl MessageFormat {
    /// Parse `source` for `locale`, resolving functions in the global
    /// registry at format time.
    pub fn new(locale: impl Into<String>, source: impl Into<String>) -> Result<Self, ParseError> {
        Self::build(locale.into(), source.into(), None)
    }

    /// Parse `source` for `locale`, resolving functions in `registry`.
    pub fn with_registry(
        locale: impl Into<String>,
        source: impl Into<String>,
        registry: Arc<FunctionRegistry>,
    ) -> Result<Self, ParseError> {
        Self::build(locale.into(), source.into(), Some(registry))
    }

    fn build(
        locale: String,
        source: String,
        registry: Option<Arc<FunctionRegistry>>,
    ) -> Result<Self, ParseError> {
        let message = parse_message(&source)?;
        Ok(MessageFormat {
            locale,
            source,
            message,
            registry,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Format the message to a string.
    #[instrument(level = "debug", skip_all, fields(locale = %self.locale))]
    pub fn format(&self, args: &Args) -> Result<String, EvalError> {
        let registry = self.registry();
        let mut ctx = FormattingContext::new(&self.locale, args, &registry);
        format_message(&mut ctx, &self.message)
    }

    /// Format the message to an ordered sequence of typed parts.
    #[instrument(level = "debug", skip_all, fields(locale = %self.locale))]
    pub fn format_to_parts(&self, args: &Args) -> Result<Vec<Part>, EvalError> {
        let registry = self.registry();
        let mut ctx = FormattingContext::new(&self.locale, args, &registry);
        format_message_to_parts(&mut ctx, &self.message)
    }

    fn registry(&self) -> Arc<FunctionRegistry> {
        self.registry.clone().unwrap_or_else(global::snapshot)
    }
}
