//! CLI support for ognl-parser
//!
//! Provides programmatic access to the `ognl` command functionality for
//! embedding in other tools.

mod check;
mod tokens;

pub use check::{execute_check, CheckOptions, CheckResult, OutputFormat};
pub use tokens::{execute_tokens, format_token};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more parse diagnostics
    #[error("{0}")]
    Parse(#[from] crate::ParseErrors),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Pass an expression or pipe one to stdin.")]
    NoInput,
}
