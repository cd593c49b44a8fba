//! CLI command implementations.

mod format;
mod lex;
mod parse;

use std::fs::read_to_string;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, miette};

pub use format::{FormatArgs, run_format};
pub use lex::{LexArgs, run_lex};
pub use parse::{ParseArgs, run_parse};

/// Where a command reads its message source from.
#[derive(Debug, clap::Args)]
pub struct SourceArgs {
    /// Message source file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,

    /// Message source given inline instead of a file
    #[arg(short = 'm', long, conflicts_with = "file")]
    pub message: Option<String>,
}

/// The message source and a display name for diagnostics.
pub struct Source {
    pub name: String,
    pub text: String,
}

impl SourceArgs {
    pub fn read(&self) -> Result<Source> {
        if let Some(text) = &self.message {
            return Ok(Source {
                name: "<message>".into(),
                text: text.clone(),
            });
        }
        match self.file.as_deref() {
            Some(path) if path != Path::new("-") => {
                let text = read_to_string(path)
                    .into_diagnostic()
                    .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;
                Ok(Source {
                    name: path.display().to_string(),
                    text,
                })
            }
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .into_diagnostic()
                    .map_err(|e| miette!("Failed to read stdin: {}", e))?;
                Ok(Source {
                    name: "<stdin>".into(),
                    text,
                })
            }
        }
    }
}
