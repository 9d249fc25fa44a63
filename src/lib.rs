pub mod ast;
pub mod lexer;
pub mod output;
pub mod parser;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, Expr, Literal, SelectKind, Token, TokenKind, UnaryOp};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty, to_tree};
pub use parser::{ParseError, ParseErrorKind, ParseErrors, ParseOutput, Parser, ParserLimits};

/// Parses one expression, returning the possibly partial tree together with
/// every diagnostic.
///
/// ```
/// let output = ognl_parser::parse_top_level("1 + 2 * 3");
/// assert!(output.errors.is_empty());
/// assert_eq!(output.expr.map(|e| e.tag()), Some("ASTAdd"));
/// ```
pub fn parse_top_level(source: &str) -> ParseOutput {
    Parser::new(Lexer::new(source)).parse_top_level()
}

/// Parses one expression, succeeding only when no diagnostic was recorded.
///
/// ```
/// use ognl_parser::parse_expression;
///
/// let expr = parse_expression("user.name").unwrap();
/// assert_eq!(expr.tag(), "ASTChain");
/// assert!(parse_expression("a +").is_err());
/// ```
pub fn parse_expression(source: &str) -> Result<Expr, ParseErrors> {
    parse_top_level(source).into_result()
}

/// Scans `source` into tokens, end of input excluded.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
