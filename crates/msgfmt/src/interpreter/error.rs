//! Error types for message formatting.

use strsim::levenshtein;
use thiserror::Error;

use crate::error::ErrorKind;

/// An error that occurred while formatting a parsed message.
///
/// Formatting fails fast: the first error aborts the whole call and no
/// partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No function with this name is registered for the role it is used in.
    #[error("unknown function ':{name}'{}", did_you_mean(suggestions))]
    UnknownFunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// A variable is neither a local declaration nor an external argument.
    #[error("unknown variable '${name}'")]
    UnknownVariable { name: String },

    /// The glossary has no entry for this term in the current locale.
    #[error("unknown term '{term}' in locale '{locale}'")]
    UnknownTerm { term: String, locale: String },

    /// A selector-only value was used as pattern content.
    #[error("a value of type '{type_name}' cannot be formatted")]
    NotFormattable { type_name: String },

    /// A format-only value was used as a selector.
    #[error("a value of type '{type_name}' cannot be used as a selector")]
    NotMatchable { type_name: String },

    /// A function was called without the operand it requires.
    #[error("function ':{function}' requires an operand")]
    MissingArgument { function: String },

    /// A function's operand or option has the wrong shape.
    #[error("invalid argument to ':{function}': {message}")]
    InvalidArgument { function: String, message: String },

    /// A numeric option is outside the range the function supports.
    #[error("option '{option}' of ':{function}' must be at most {max}, got {value}")]
    OptionOutOfRange {
        function: String,
        option: String,
        value: usize,
        max: usize,
    },

    /// Every variant had at least one mismatching key.
    #[error("No variant matched the selectors.")]
    NoVariantMatched,

    /// The locale tag could not be used for locale-sensitive rules.
    #[error("unsupported locale '{locale}'")]
    UnsupportedLocale { locale: String },
}

impl EvalError {
    /// The error category, for diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownFunction { .. }
            | EvalError::UnknownVariable { .. }
            | EvalError::UnknownTerm { .. } => ErrorKind::Reference,
            EvalError::NotFormattable { .. }
            | EvalError::NotMatchable { .. }
            | EvalError::MissingArgument { .. }
            | EvalError::InvalidArgument { .. } => ErrorKind::Type,
            EvalError::OptionOutOfRange { .. }
            | EvalError::NoVariantMatched
            | EvalError::UnsupportedLocale { .. } => ErrorKind::Range,
        }
    }

    pub(crate) fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Return up to three names from `available` within a small edit distance
/// of `target`, closest first.
///
/// Names of three characters or fewer tolerate one edit; longer names
/// tolerate two.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|name| (levenshtein(target, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}
