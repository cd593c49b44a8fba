use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::{Formattable, Part, RuntimeValue};
use crate::interpreter::{EvalError, FormattingContext};

/// A host object carried through formatting without being stringified.
///
/// Formatting to parts yields one `opaque` part holding the same object;
/// formatting to a string is a type error.
#[derive(Clone)]
pub struct Opaque {
    payload: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Opaque {
            payload: Arc::new(value),
        }
    }

    /// Wrap an existing shared object, keeping its identity.
    pub fn from_arc(payload: Arc<dyn Any + Send + Sync>) -> Self {
        Opaque { payload }
    }

    pub fn payload(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.payload
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

impl Formattable for Opaque {
    fn format_to_string(&self, _ctx: &FormattingContext<'_>) -> Result<String, EvalError> {
        Err(EvalError::NotFormattable {
            type_name: self.type_name().to_string(),
        })
    }

    fn format_to_parts(&self, _ctx: &FormattingContext<'_>) -> Result<Vec<Part>, EvalError> {
        Ok(vec![Part::Opaque(self.clone())])
    }
}

impl RuntimeValue for Opaque {
    fn type_name(&self) -> &'static str {
        "opaque"
    }

    fn as_formattable(&self) -> Option<&dyn Formattable> {
        Some(self)
    }
}
