//! Implementation of the `msgfmt format` command.

use std::path::PathBuf;
use std::sync::Arc;

use miette::IntoDiagnostic;
use msgfmt::functions::register_term;
use msgfmt::{Args, Error, FunctionRegistry, Glossary, MessageFormat, Part, Value};
use serde::Serialize;
use tracing::debug;

use super::SourceArgs;
use crate::output::report_error;

/// Arguments for the format command.
#[derive(Debug, clap::Args)]
pub struct FormatArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Locale tag for formatting (e.g., en, pl, tr)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Arguments in name=value format (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    /// Glossary JSON file for the `:term` function
    #[arg(long)]
    pub glossary: Option<PathBuf>,

    /// Print formatted parts instead of a string
    #[arg(long)]
    pub parts: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

enum Formatted {
    Text(String),
    Parts(Vec<Part>),
}

/// JSON output for format results.
#[derive(Serialize)]
struct FormatResult {
    result: String,
}

/// Parse a name=value argument string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid argument format '{s}': expected name=value"))?;
    Ok((name.to_string(), value.to_string()))
}

/// Integers become numbers; everything else stays a string.
fn to_value(text: String) -> Value {
    match text.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(text),
    }
}

fn build_registry(glossary: Option<&PathBuf>) -> miette::Result<Arc<FunctionRegistry>> {
    let mut registry = FunctionRegistry::with_builtins();
    if let Some(path) = glossary {
        let glossary = Glossary::load(path).into_diagnostic()?;
        register_term(&mut registry, Arc::new(glossary));
    }
    Ok(Arc::new(registry))
}

/// Run the format command.
pub fn run_format(args: FormatArgs) -> miette::Result<i32> {
    let source = args.source.read()?;
    let registry = build_registry(args.glossary.as_ref())?;

    let message = match MessageFormat::with_registry(&args.locale, source.text.as_str(), registry)
    {
        Ok(message) => message,
        Err(e) => {
            report_error(&source, &Error::from(e), args.json);
            return Ok(exitcode::DATAERR);
        }
    };

    let values: Args = args
        .args
        .into_iter()
        .map(|(name, value)| (name, to_value(value)))
        .collect();
    debug!(count = values.len(), "formatting with arguments");

    let formatted = if args.parts {
        message.format_to_parts(&values).map(Formatted::Parts)
    } else {
        message.format(&values).map(Formatted::Text)
    };
    let formatted = match formatted {
        Ok(formatted) => formatted,
        Err(e) => {
            report_error(&source, &Error::from(e), args.json);
            return Ok(exitcode::DATAERR);
        }
    };

    let text = match formatted {
        Formatted::Parts(parts) => serde_json::to_string_pretty(&parts).into_diagnostic()?,
        Formatted::Text(result) if args.json => {
            serde_json::to_string_pretty(&FormatResult { result }).into_diagnostic()?
        }
        Formatted::Text(result) => result,
    };
    println!("{text}");
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("name").is_err());
    }

    #[test]
    fn test_integer_arguments_become_numbers() {
        assert!(to_value("42".into()).as_number().is_some());
        assert_eq!(to_value("4.2".into()).as_str(), Some("4.2"));
    }
}
