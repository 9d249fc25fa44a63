//! Parse OGNL expressions and render the resulting tree

use super::CliError;
use crate::output::{to_json, to_json_pretty, to_tree};
use crate::{Lexer, Parser};

/// How a parsed tree is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented `TAG fragment` lines
    #[default]
    Tree,
    /// Compact JSON
    Json,
    /// Indented JSON
    JsonPretty,
}

/// Options for the check and parse commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The OGNL expression to parse
    pub expression: String,
    /// Output format for the tree
    pub format: OutputFormat,
    /// Only validate syntax, don't render the tree
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The rendered tree
    Rendered(String),
}

/// Parse an expression and render it according to `options`
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.expression.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let mut parser = Parser::new(Lexer::new(&options.expression));
    let expr = parser.parse_top_level().into_result()?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = match options.format {
        OutputFormat::Tree => to_tree(&expr),
        OutputFormat::Json => to_json(&expr),
        OutputFormat::JsonPretty => to_json_pretty(&expr),
    };
    Ok(CheckResult::Rendered(rendered))
}
