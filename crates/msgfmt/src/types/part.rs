use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Opaque;

/// One unit of structured output from `format_to_parts`.
#[derive(Debug, Clone)]
pub enum Part {
    /// Typed text such as `literal`, `integer`, or `fraction`.
    Text { kind: String, value: String },
    /// A host object passed through untouched.
    Opaque(Opaque),
    /// `{+name ...}` with its options formatted to strings.
    MarkupOpen {
        name: String,
        options: BTreeMap<String, String>,
    },
    /// `{-name}`
    MarkupClose { name: String },
}

impl Part {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Part::Text {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// A `literal` text part.
    pub fn literal(value: impl Into<String>) -> Self {
        Part::new("literal", value)
    }

    /// The part's `type` tag.
    pub fn kind(&self) -> &str {
        match self {
            Part::Text { kind, .. } => kind,
            Part::Opaque(_) => "opaque",
            Part::MarkupOpen { .. } => "markupOpen",
            Part::MarkupClose { .. } => "markupClose",
        }
    }

    /// The text of a text part.
    pub fn value(&self) -> Option<&str> {
        match self {
            Part::Text { value, .. } => Some(value),
            Part::Opaque(_) | Part::MarkupOpen { .. } | Part::MarkupClose { .. } => None,
        }
    }
}

/// Opaque parts compare by pointer identity.
impl PartialEq for Part {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Part::Text { kind, value },
                Part::Text {
                    kind: other_kind,
                    value: other_value,
                },
            ) => kind == other_kind && value == other_value,
            (Part::Opaque(a), Part::Opaque(b)) => a.ptr_eq(b),
            (
                Part::MarkupOpen { name, options },
                Part::MarkupOpen {
                    name: other_name,
                    options: other_options,
                },
            ) => name == other_name && options == other_options,
            (Part::MarkupClose { name }, Part::MarkupClose { name: other_name }) => {
                name == other_name
            }
            _ => false,
        }
    }
}

impl Serialize for Part {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Part::Text { value, .. } => map.serialize_entry("value", value)?,
            Part::Opaque(_) => map.serialize_entry("value", &())?,
            Part::MarkupOpen { name, options } => {
                map.serialize_entry("name", name)?;
                map.serialize_entry("options", options)?;
            }
            Part::MarkupClose { name } => map.serialize_entry("name", name)?,
        }
        map.end()
    }
}
