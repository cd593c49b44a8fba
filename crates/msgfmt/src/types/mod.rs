//! Runtime values produced while formatting.

mod number;
mod opaque;
mod part;
mod plural;
mod string;
mod value;

pub use number::{MAX_DIGITS, Number, NumberOptions};
pub use opaque::Opaque;
pub use part::Part;
pub use plural::PluralSelector;
pub use string::StringValue;
pub use value::{AsAny, Formattable, Matchable, RuntimeValue, Value};
