//! Dump the lexer's token stream

use crate::{Lexer, Token};

/// One line per token: `LINE:COLUMN KIND raw`, plus the lexical error for
/// illegal tokens.
pub fn format_token(token: &Token) -> String {
    let mut line = format!(
        "{}:{} {} {}",
        token.position.line, token.position.column, token.kind, token.raw
    );
    if let Some(err) = &token.error {
        line.push_str(&format!(" ({})", err));
    }
    line
}

/// Scan `source` and format every token. Returns the lines and whether any
/// token was illegal.
pub fn execute_tokens(source: &str) -> (Vec<String>, bool) {
    let mut has_errors = false;
    let lines: Vec<String> = Lexer::new(source)
        .inspect(|token| has_errors |= token.error.is_some())
        .map(|token| format_token(&token))
        .collect();
    (lines, has_errors)
}
