//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use msgfmt::parser::Token;

/// Format a token stream as a table of kind, value, and byte span.
pub fn format_token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Value", "Span"]);

    for token in tokens {
        table.add_row(vec![
            token.kind.as_str().to_string(),
            format!("{:?}", token.value),
            format!("{}-{}", token.span.start, token.span.end),
        ]);
    }

    table
}
