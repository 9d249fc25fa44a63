use std::fmt;

use crate::lexer::{LexError, Position};

/// Kinds of lexical tokens.
///
/// Keyword spellings of operators (`and`, `eq`, `shl`, ...) produce the same
/// kind as their symbolic form; the original spelling stays in
/// [`Token::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unrecognised or malformed input. The token carries a [`LexError`].
    Illegal,
    /// End of input
    Eof,

    // Identifiers and literals
    /// Identifier
    ///
    /// # Examples
    /// ```text
    /// name
    /// _internal
    /// size2
    /// ```
    Ident,
    /// Integer literal, decimal, hex or octal, with optional `l`/`h` suffix
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0x1F
    /// 0777
    /// 1234L
    /// 10h
    /// ```
    IntLiteral,
    /// Floating-point literal with optional exponent and `d`/`f`/`b` suffix
    ///
    /// # Examples
    /// ```text
    /// 1.5
    /// .25
    /// 12.
    /// 1e10
    /// 2.5f
    /// 100.0B
    /// ```
    FloatLiteral,
    /// Single-quoted literal holding exactly one character
    CharLiteral,
    /// Double-quoted literal, or a single-quoted one that is not one character long
    StringLiteral,
    /// Back-quoted single character
    ///
    /// # Examples
    /// ```text
    /// `a`
    /// ```
    BackCharLiteral,

    // Punctuation
    Assign,
    Comma,
    Semicolon,
    Question,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Hash,
    At,
    Dollar,

    // Logical and bitwise
    /// `||` or `or`
    Or,
    /// `&&` or `and`
    And,
    /// `|` or `bor`
    BitOr,
    /// `^` or `xor`
    Xor,
    /// `&` or `band`
    BitAnd,
    /// `~`
    BitNot,
    /// `!` or `not`
    Not,

    // Comparison
    /// `==` or `eq`
    Eq,
    /// `!=` or `neq`
    NotEq,
    /// `<` or `lt`
    Lt,
    /// `>` or `gt`
    Gt,
    /// `<=` or `lte`
    LtEq,
    /// `>=` or `gte`
    GtEq,
    /// `in`
    In,
    /// `not in`, fused by the lexer
    NotIn,

    // Shifts
    /// `<<` or `shl`
    Shl,
    /// `>>` or `shr`
    Shr,
    /// `>>>` or `ushr`
    Ushr,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Keywords
    Instanceof,
    True,
    False,
    Null,
    New,
}

impl TokenKind {
    /// Canonical upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::FloatLiteral => "FLT_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringLiteral => "STR_LITERAL",
            TokenKind::BackCharLiteral => "BACK_CHAR_LITERAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACK",
            TokenKind::RBracket => "RBRACK",
            TokenKind::Hash => "HASH",
            TokenKind::At => "AT",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::BitOr => "BIT_OR",
            TokenKind::Xor => "XOR",
            TokenKind::BitAnd => "BIT_AND",
            TokenKind::BitNot => "BIT_NOT",
            TokenKind::Not => "NOT",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::LtEq => "LT_EQ",
            TokenKind::GtEq => "GT_EQ",
            TokenKind::In => "IN",
            TokenKind::NotIn => "NOT_IN",
            TokenKind::Shl => "SHL",
            TokenKind::Shr => "SHR",
            TokenKind::Ushr => "USHR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::Instanceof => "INSTANCEOF",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::New => "NEW",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves an identifier to its keyword kind, if it is one.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "bor" => TokenKind::BitOr,
        "xor" => TokenKind::Xor,
        "band" => TokenKind::BitAnd,
        "eq" => TokenKind::Eq,
        "neq" => TokenKind::NotEq,
        "lt" => TokenKind::Lt,
        "gt" => TokenKind::Gt,
        "lte" => TokenKind::LtEq,
        "gte" => TokenKind::GtEq,
        "in" => TokenKind::In,
        "not" => TokenKind::Not,
        "shl" => TokenKind::Shl,
        "shr" => TokenKind::Shr,
        "ushr" => TokenKind::Ushr,
        "instanceof" => TokenKind::Instanceof,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "new" => TokenKind::New,
        _ => return None,
    };
    Some(kind)
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded text: identifier name, literal contents with escapes
    /// processed, or the operator as written.
    pub value: String,
    /// Source text exactly as it appeared, quotes and suffixes included.
    pub raw: String,
    /// Line and column of the first character.
    pub position: Position,
    /// Set on [`TokenKind::Illegal`] tokens.
    pub error: Option<LexError>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, raw: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            raw: raw.into(),
            position,
            error: None,
        }
    }

    pub fn illegal(error: LexError, raw: impl Into<String>, position: Position) -> Self {
        let raw = raw.into();
        Token {
            kind: TokenKind::Illegal,
            value: raw.clone(),
            raw,
            position,
            error: Some(error),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} at {}:{}",
            self.kind, self.raw, self.position.line, self.position.column
        )
    }
}
