//! Output helpers shared by the commands.

pub mod diagnostic;
pub mod table;

use msgfmt::Error;
use owo_colors::{OwoColorize, Stream};

pub use diagnostic::MessageDiagnostic;

use crate::commands::Source;

/// The one-line error report: `[<kind> at <start>-<end>] <message>`.
///
/// Errors raised while formatting carry no source position and print as
/// `[<kind>] <message>`.
pub fn error_line(err: &Error) -> String {
    match err.span() {
        Some(span) => format!("[{} at {}-{}] {}", err.kind(), span.start, span.end, err),
        None => format!("[{}] {}", err.kind(), err),
    }
}

/// Report a failure on stderr, followed by an annotated source excerpt when
/// the error points into the source.
pub fn report_error(source: &Source, err: &Error, json: bool) {
    if json {
        let span = err.span().map(|span| {
            serde_json::json!({
                "start": span.start,
                "end": span.end,
            })
        });
        let output = serde_json::json!({
            "error": {
                "kind": err.kind().name(),
                "message": err.to_string(),
                "span": span,
            }
        });
        eprintln!("{output:#}");
        return;
    }

    eprintln!(
        "{}",
        error_line(err).if_supports_color(Stream::Stderr, |line| line.red())
    );
    if let Some(span) = err.span() {
        let report = miette::Report::new(MessageDiagnostic::new(source, span, err));
        eprintln!("{report:?}");
    }
}
