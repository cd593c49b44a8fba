//! Term store for the `:term` function.
//!
//! A glossary maps locale → term → form → text. It is loaded once and
//! injected into a registry, so formatting never touches the filesystem.
//!
//! ```json
//! {
//!   "en": { "t-shirt": { "canonical": "T-shirt" } },
//!   "pl": { "t-shirt": { "canonical": "tiszert", "gender": "masculine" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The forms of one term, keyed by form name (e.g. `canonical`).
pub type Term = BTreeMap<String, String>;

/// Errors that occur while loading a glossary.
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// File I/O error when reading the glossary file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The glossary is not valid JSON of the expected shape.
    #[error("invalid glossary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Terms per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glossary {
    locales: BTreeMap<String, BTreeMap<String, Term>>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a glossary from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, GlossaryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a glossary JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GlossaryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| GlossaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let glossary = Self::from_json_str(&json)?;
        debug!(path = %path.display(), locales = glossary.locales.len(), "loaded glossary");
        Ok(glossary)
    }

    /// Add or replace a term's forms for `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, term: impl Into<String>, forms: Term) {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(term.into(), forms);
    }

    /// Find a term, falling back from `en-US` to `en` if the full tag has no
    /// entry for it.
    pub fn lookup(&self, locale: &str, term: &str) -> Option<&Term> {
        let exact = self.locales.get(locale).and_then(|terms| terms.get(term));
        exact.or_else(|| {
            let (language, _) = locale.split_once(['-', '_'])?;
            self.locales.get(language)?.get(term)
        })
    }

    /// Find a single form of a term.
    pub fn form(&self, locale: &str, term: &str, form: &str) -> Option<&str> {
        self.lookup(locale, term)?.get(form).map(String::as_str)
    }

    /// Locale tags with at least one term, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}
