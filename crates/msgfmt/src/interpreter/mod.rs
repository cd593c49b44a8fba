//! Message interpreter.
//!
//! This module resolves parsed messages against a locale, external
//! arguments, and a function registry. It binds local declarations,
//! selects a variant, and renders the winning pattern to a string or to
//! typed parts.

mod context;
mod error;
mod evaluator;
mod plural;
mod registry;

pub use context::{Args, FormattingContext};
pub use error::{EvalError, compute_suggestions};
pub use evaluator::{format_message, format_message_to_parts};
pub use plural::{PluralInput, PluralType, plural_category};
pub use registry::{Function, FunctionRegistry, ResolvedOptions, Role};
