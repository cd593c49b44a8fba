//! Implementation of the `msgfmt lex` command.

use msgfmt::Error;
use msgfmt::parser::tokenize;

use super::SourceArgs;
use crate::output::report_error;
use crate::output::table::format_token_table;

/// Arguments for the lex command.
#[derive(Debug, clap::Args)]
pub struct LexArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the lex command.
pub fn run_lex(args: LexArgs) -> miette::Result<i32> {
    let source = args.source.read()?;
    let tokens = match tokenize(&source.text) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_error(&source, &Error::from(e), args.json);
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&tokens)
            .map_err(|e| miette::miette!("Failed to serialize tokens: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", format_token_table(&tokens));
    }
    Ok(exitcode::OK)
}
