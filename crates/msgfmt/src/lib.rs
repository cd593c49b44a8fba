pub mod error;
pub mod format;
pub mod functions;
pub mod global;
pub mod glossary;
pub mod interpreter;
pub mod parser;
mod printer;
pub mod text;
pub mod types;

pub use error::{Error, ErrorKind};
pub use format::MessageFormat;
pub use glossary::{Glossary, GlossaryError};
pub use interpreter::{
    Args, EvalError, FormattingContext, FunctionRegistry, ResolvedOptions, Role,
    compute_suggestions,
};
pub use parser::{LexError, Message, ParseError, parse_message};
pub use types::{
    Formattable, Matchable, Number, NumberOptions, Opaque, Part, PluralSelector, RuntimeValue,
    StringValue, Value,
};

/// Creates an [`Args`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so you can pass integers,
/// floats, strings, or any [`Value`] directly.
///
/// # Example
///
/// ```
/// use msgfmt::args;
///
/// let a = args! { "count" => 3, "name" => "Alice" };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        $crate::Args::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Args::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
