//! Miette diagnostic wrapper for message source errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::ops::Range;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::commands::Source;

/// A miette-compatible diagnostic pointing into message source.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(msgfmt::source))]
pub struct MessageDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    kind: String,

    message: String,
}

impl MessageDiagnostic {
    /// Create a diagnostic for `err` covering `span` of the source.
    pub fn new(source: &Source, span: Range<usize>, err: &msgfmt::Error) -> Self {
        // Clamp to the source to avoid a miette panic on out-of-bounds spans
        let start = span.start.min(source.text.len());
        let end = span.end.clamp(start, source.text.len());

        MessageDiagnostic {
            src: NamedSource::new(source.name.clone(), source.text.clone()),
            span: (start, end - start).into(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
