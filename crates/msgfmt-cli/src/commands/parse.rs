//! Implementation of the `msgfmt parse` command.

use msgfmt::{Error, parse_message};

use super::SourceArgs;
use crate::output::report_error;

/// Arguments for the parse command.
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the canonical source instead of the JSON syntax tree
    #[arg(long)]
    pub canonical: bool,
}

/// Run the parse command.
pub fn run_parse(args: ParseArgs) -> miette::Result<i32> {
    let source = args.source.read()?;
    let message = match parse_message(&source.text) {
        Ok(message) => message,
        Err(e) => {
            report_error(&source, &Error::from(e), false);
            return Ok(exitcode::DATAERR);
        }
    };

    if args.canonical {
        println!("{message}");
    } else {
        let json = serde_json::to_string_pretty(&message)
            .map_err(|e| miette::miette!("Failed to serialize syntax tree: {}", e))?;
        println!("{json}");
    }
    Ok(exitcode::OK)
}
