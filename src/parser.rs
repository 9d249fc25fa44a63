use std::fmt;
use std::mem;

use log::{debug, trace};
use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, Literal, SelectKind, Token, TokenKind, UnaryOp},
    lexer::{LexError, Lexer},
};

/// Class used by the `@@method(...)` shorthand.
pub const MATH_CLASS: &str = "java.lang.Math";

/// Hard caps that keep pathological input from running unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    /// Navigation steps allowed across the whole parse.
    pub max_iterations: usize,
    /// Separators allowed in one dotted class name.
    pub max_class_name_depth: usize,
    /// Nested sub-expressions (groupings, prefix operators, right-nested
    /// assignments and conditionals) allowed at once.
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        ParserLimits {
            max_iterations: 20_000,
            max_class_name_depth: 100,
            max_depth: 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lexical(#[from] LexError),
    #[error("expected {expected}, got {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("expected '{delimiter}' to close {construct}, got {found}")]
    Unclosed {
        delimiter: char,
        construct: &'static str,
        found: TokenKind,
    },
    #[error("expected expression, got {0}")]
    ExpectedExpression(TokenKind),
    #[error("expected type name after {0}")]
    MissingTypeName(&'static str),
    #[error("expected member name after @")]
    MissingMemberName,
    #[error("could not decode numeric literal '{0}'")]
    InvalidNumber(String),
    #[error("parse iteration limit exceeded ({0})")]
    IterationLimit(usize),
    #[error("class name deeper than {0} segments")]
    ClassNameTooDeep(usize),
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("@@ can only be used with method calls, not field access")]
    StaticFieldViaShortcut,
    #[error("expected end of input, got {0}")]
    TrailingInput(TokenKind),
}

/// A diagnostic tied to the token where it was detected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}, column {column} at {token}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Every diagnostic from one parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Result of [`Parser::parse_top_level`]: the tree, possibly partial, and
/// every diagnostic recorded on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub expr: Option<Expr>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.expr.is_some() && self.errors.is_empty()
    }

    /// Succeeds only when the parse produced a tree and no diagnostics.
    pub fn into_result(self) -> Result<Expr, ParseErrors> {
        match self.expr {
            Some(expr) if self.errors.is_empty() => Ok(expr),
            _ => Err(ParseErrors(self.errors)),
        }
    }
}

/// Recursive-descent OGNL parser.
///
/// Productions return `None` after recording a diagnostic; the failure
/// unwinds to the nearest sequence element or to the top level.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
    iterations: usize,
    depth: usize,
    limits: ParserLimits,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self::with_limits(lexer, ParserLimits::default())
    }

    pub fn with_limits(mut lexer: Lexer, limits: ParserLimits) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            iterations: 0,
            depth: 0,
            limits,
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses one complete expression. Anything left before end of input is
    /// reported.
    pub fn parse_top_level(&mut self) -> ParseOutput {
        debug!("parsing expression starting at {}", self.current);

        let expr = self.parse_sequence();
        if !self.current.is(TokenKind::Eof) {
            let found = self.current.kind;
            self.fail::<()>(ParseErrorKind::TrailingInput(found));
        }

        debug!(
            "parse finished: {} node(s), {} error(s)",
            expr.as_ref().map_or(0, Expr::node_count),
            self.errors.len()
        );
        ParseOutput {
            expr,
            errors: mem::take(&mut self.errors),
        }
    }

    // ========================================================================
    // Token handling
    // ========================================================================

    fn take(&mut self) -> Token {
        let next = self.lexer.next_token();
        let peek = mem::replace(&mut self.peek, next);
        mem::replace(&mut self.current, peek)
    }

    fn advance(&mut self) {
        self.take();
    }

    /// Records a diagnostic at the current token. An illegal token reports
    /// its lexical error instead and is skipped.
    fn fail<T>(&mut self, kind: ParseErrorKind) -> Option<T> {
        let illegal = self.current.is(TokenKind::Illegal);
        let kind = match &self.current.error {
            Some(err) if illegal => ParseErrorKind::Lexical(err.clone()),
            _ => kind,
        };

        let error = ParseError {
            kind,
            token: self.current.kind,
            line: self.current.position.line,
            column: self.current.position.column,
        };
        trace!("recorded parse error: {}", error);
        self.errors.push(error);

        if illegal {
            self.advance();
        }
        None
    }

    fn unexpected<T>(&mut self, expected: &'static str) -> Option<T> {
        let found = self.current.kind;
        self.fail(ParseErrorKind::UnexpectedToken { expected, found })
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Option<()> {
        if self.current.is(kind) {
            self.advance();
            Some(())
        } else {
            self.unexpected(expected)
        }
    }

    fn expect_closing(&mut self, kind: TokenKind, delimiter: char, construct: &'static str) -> Option<()> {
        if self.current.is(kind) {
            self.advance();
            Some(())
        } else {
            let found = self.current.kind;
            self.fail(ParseErrorKind::Unclosed {
                delimiter,
                construct,
                found,
            })
        }
    }

    /// Runs `parse` one nesting level deeper, failing once the depth limit
    /// is reached.
    fn descend(&mut self, parse: fn(&mut Self) -> Option<Expr>) -> Option<Expr> {
        if self.depth >= self.limits.max_depth {
            let limit = self.limits.max_depth;
            return self.fail(ParseErrorKind::NestingTooDeep(limit));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Operator cascade
    // ========================================================================

    /// `a, b, c`. Failed elements are dropped and parsing resumes at the
    /// next comma.
    fn parse_sequence(&mut self) -> Option<Expr> {
        let first = self.parse_assignment();
        if !self.current.is(TokenKind::Comma) {
            return first;
        }

        let mut items: Vec<Expr> = first.into_iter().collect();
        while self.current.is(TokenKind::Comma) {
            self.advance();
            items.extend(self.parse_assignment());
        }

        match items.len() {
            0 => None,
            1 => items.pop(),
            _ => Some(Expr::Sequence(items)),
        }
    }

    fn parse_assignment(&mut self) -> Option<Expr> {
        let lhs = self.parse_conditional()?;

        if self.current.is(TokenKind::Assign) {
            self.advance();
            let rhs = self.descend(Self::parse_assignment)?;
            return Some(Expr::Assign {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }
        Some(lhs)
    }

    fn parse_conditional(&mut self) -> Option<Expr> {
        let test = self.parse_or()?;

        if !self.current.is(TokenKind::Question) {
            return Some(test);
        }
        self.advance();

        let then = self.descend(Self::parse_conditional)?;
        self.expect(TokenKind::Colon, "':' in conditional expression")?;
        let otherwise = self.descend(Self::parse_conditional)?;

        Some(Expr::Test {
            test: Box::new(test),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Left-associative fold over one precedence level.
    fn fold_left(
        &mut self,
        operand: fn(&mut Self) -> Option<Expr>,
        operator: fn(TokenKind) -> Option<BinOp>,
    ) -> Option<Expr> {
        let lhs = operand(self)?;
        self.fold_from(lhs, operand, operator, &mut 0)
    }

    /// Continues a fold from an already parsed left operand. `spine` counts
    /// the nodes built above that operand.
    fn fold_from(
        &mut self,
        mut lhs: Expr,
        operand: fn(&mut Self) -> Option<Expr>,
        operator: fn(TokenKind) -> Option<BinOp>,
        spine: &mut usize,
    ) -> Option<Expr> {
        while let Some(op) = operator(self.current.kind) {
            self.advance();
            let rhs = operand(self)?;
            lhs = Expr::binary(op, lhs, rhs);
            *spine += 1;
        }
        Some(lhs)
    }

    fn parse_or(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_and, |kind| match kind {
            TokenKind::Or => Some(BinOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_bit_or, |kind| match kind {
            TokenKind::And => Some(BinOp::And),
            _ => None,
        })
    }

    fn parse_bit_or(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_xor, |kind| match kind {
            TokenKind::BitOr => Some(BinOp::BitOr),
            _ => None,
        })
    }

    fn parse_xor(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_bit_and, |kind| match kind {
            TokenKind::Xor => Some(BinOp::Xor),
            _ => None,
        })
    }

    fn parse_bit_and(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_equality, |kind| match kind {
            TokenKind::BitAnd => Some(BinOp::BitAnd),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_relational, |kind| match kind {
            TokenKind::Eq => Some(BinOp::Eq),
            TokenKind::NotEq => Some(BinOp::NotEq),
            _ => None,
        })
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        let lhs = if self.current.is(TokenKind::Not) && self.current.value == "not" {
            self.parse_keyword_not()?
        } else {
            self.parse_shift()?
        };
        self.fold_from(lhs, Self::parse_shift, relational_op, &mut 0)
    }

    /// `not X in Y` is the membership test over the whole shift-level `X`.
    /// Without a following `in`, `not` binds to its unary operand only.
    fn parse_keyword_not(&mut self) -> Option<Expr> {
        self.advance();
        let operand = self.parse_unary()?;

        let mut spine = 0;
        let lhs = self.fold_from(operand, Self::parse_unary, multiplicative_op, &mut spine)?;
        let lhs = self.fold_from(lhs, Self::parse_multiplicative, additive_op, &mut spine)?;
        let lhs = self.fold_from(lhs, Self::parse_additive, shift_op, &mut spine)?;

        if self.current.is(TokenKind::In) {
            self.advance();
            let rhs = self.parse_shift()?;
            return Some(Expr::binary(BinOp::NotIn, lhs, rhs));
        }
        Some(negate_leftmost(lhs, spine))
    }

    fn parse_shift(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_additive, shift_op)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_multiplicative, additive_op)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        self.fold_left(Self::parse_unary, multiplicative_op)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        self.descend(Self::parse_prefixed)
    }

    fn parse_prefixed(&mut self) -> Option<Expr> {
        let op = match self.current.kind {
            TokenKind::Plus => {
                self.advance();
                return self.parse_unary();
            }
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::BitNot => UnaryOp::BitNegate,
            TokenKind::Not => UnaryOp::Not,
            _ => return self.parse_instanceof(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Some(Expr::unary(op, operand))
    }

    fn parse_instanceof(&mut self) -> Option<Expr> {
        let operand = self.parse_chain()?;

        if !self.current.is(TokenKind::Instanceof) {
            return Some(operand);
        }
        self.advance();

        if !self.current.is(TokenKind::Ident) {
            return self.fail(ParseErrorKind::MissingTypeName("instanceof"));
        }
        let type_name = self.parse_class_name()?;

        Some(Expr::Instanceof {
            operand: Box::new(operand),
            type_name,
        })
    }

    // ========================================================================
    // Navigation chains
    // ========================================================================

    fn parse_chain(&mut self) -> Option<Expr> {
        let head = self.parse_primary()?;
        let mut steps = vec![head];

        while matches!(
            self.current.kind,
            TokenKind::Dot | TokenKind::LBracket | TokenKind::LParen
        ) {
            self.iterations += 1;
            if self.iterations > self.limits.max_iterations {
                let limit = self.limits.max_iterations;
                return self.fail(ParseErrorKind::IterationLimit(limit));
            }

            match self.current.kind {
                TokenKind::Dot => {
                    let step = self.parse_chain_step()?;
                    steps.push(step);
                }
                TokenKind::LBracket => {
                    self.advance();
                    let step = self.parse_index()?;
                    steps.push(step);
                }
                _ => {
                    self.advance();
                    let step = self.parse_call_step(&mut steps)?;
                    steps.push(step);
                }
            }
        }

        Expr::chain(steps)
    }

    /// `(arg)` inside a chain: an eval when the chain so far is a single
    /// value reference, otherwise an unnamed method call.
    fn parse_call_step(&mut self, steps: &mut Vec<Expr>) -> Option<Expr> {
        if steps.len() == 1 && steps[0].is_value_reference() {
            let arg = self.parse_sequence()?;
            self.expect_closing(TokenKind::RParen, ')', "eval argument")?;
            let target = steps.pop()?;
            return Some(Expr::Eval {
                target: Box::new(target),
                arg: Box::new(arg),
            });
        }

        let mut args = Vec::new();
        if !self.current.is(TokenKind::RParen) {
            args.push(self.parse_sequence()?);
        }
        self.expect_closing(TokenKind::RParen, ')', "argument list")?;
        Some(Expr::Method {
            name: String::new(),
            args,
        })
    }

    /// The step after a `.`; the dot is still the current token.
    fn parse_chain_step(&mut self) -> Option<Expr> {
        match self.peek.kind {
            TokenKind::Ident => {
                self.advance();
                self.parse_identifier()
            }
            TokenKind::LParen => {
                self.advance();
                self.advance();
                let inner = self.parse_sequence()?;
                self.expect_closing(TokenKind::RParen, ')', "eval group")?;
                Some(inner)
            }
            TokenKind::LBrace => {
                self.advance();
                self.parse_projection_or_selection()
            }
            TokenKind::At => {
                self.advance();
                self.parse_static_reference()
            }
            _ => {
                self.advance();
                self.unexpected("identifier, '(', '{' or '@' after '.'")
            }
        }
    }

    /// Property or method call named by the current identifier.
    fn parse_identifier(&mut self) -> Option<Expr> {
        let name = self.take().value;

        if self.current.is(TokenKind::LParen) {
            self.advance();
            let args = self.parse_arguments()?;
            return Some(Expr::Method { name, args });
        }
        Some(Expr::property(name))
    }

    /// Index contents after `[`: a dynamic subscript or a full expression.
    fn parse_index(&mut self) -> Option<Expr> {
        let symbol = match self.current.kind {
            TokenKind::Xor => Some('^'),
            TokenKind::BitOr => Some('|'),
            TokenKind::Dollar => Some('$'),
            _ => None,
        };

        if let Some(symbol) = symbol {
            if self.peek.is(TokenKind::RBracket) {
                self.advance();
                self.advance();
                return Some(Expr::index(Expr::symbol(symbol)));
            }
        }

        let index = self.parse_sequence()?;
        self.expect_closing(TokenKind::RBracket, ']', "index")?;
        Some(Expr::index(index))
    }

    /// `{body}`, `{? pred}`, `{^ pred}` or `{$ pred}`; `{` is current.
    fn parse_projection_or_selection(&mut self) -> Option<Expr> {
        self.advance();

        let kind = match self.current.kind {
            TokenKind::Question => Some(SelectKind::All),
            TokenKind::Xor => Some(SelectKind::First),
            TokenKind::Dollar => Some(SelectKind::Last),
            _ => None,
        };
        if kind.is_some() {
            self.advance();
        }

        let body = self.parse_assignment()?;
        let construct = if kind.is_some() { "selection" } else { "projection" };
        self.expect_closing(TokenKind::RBrace, '}', construct)?;

        Some(match kind {
            Some(kind) => Expr::Select {
                kind,
                predicate: Box::new(body),
            },
            None => Expr::Project(Box::new(body)),
        })
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current.kind {
            TokenKind::Ident => self.parse_identifier(),
            TokenKind::IntLiteral => self.parse_number(Literal::from_integer_text),
            TokenKind::FloatLiteral => self.parse_number(Literal::from_float_text),
            TokenKind::StringLiteral => {
                let token = self.take();
                Some(Expr::constant(Literal::String(token.value), token.raw))
            }
            TokenKind::CharLiteral | TokenKind::BackCharLiteral => {
                let token = self.take();
                let ch = token.value.chars().next().unwrap_or_default();
                Some(Expr::constant(Literal::Char(ch), token.raw))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::constant(Literal::Boolean(true), "true"))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::constant(Literal::Boolean(false), "false"))
            }
            TokenKind::Null => {
                self.advance();
                Some(Expr::constant(Literal::Null, "null"))
            }
            TokenKind::Dollar => {
                self.advance();
                Some(Expr::symbol('$'))
            }
            TokenKind::Hash => self.parse_hash(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_sequence()?;
                self.expect_closing(TokenKind::RParen, ')', "parenthesised expression")?;
                Some(inner)
            }
            TokenKind::LBracket => {
                self.advance();
                self.parse_index()
            }
            TokenKind::LBrace => self.parse_list_or_map(),
            TokenKind::New => self.parse_constructor(),
            TokenKind::At => self.parse_static_reference(),
            TokenKind::Colon => self.parse_lambda(),
            found => self.fail(ParseErrorKind::ExpectedExpression(found)),
        }
    }

    fn parse_number(&mut self, decode: fn(&str) -> Option<Literal>) -> Option<Expr> {
        match decode(&self.current.raw) {
            Some(value) => {
                let token = self.take();
                Some(Expr::constant(value, token.raw))
            }
            None => {
                let raw = self.current.raw.clone();
                let result = self.fail(ParseErrorKind::InvalidNumber(raw));
                self.advance();
                result
            }
        }
    }

    /// `#var`, `#this`, `#root`, `#{...}` or `#@Class@{...}`.
    fn parse_hash(&mut self) -> Option<Expr> {
        match self.peek.kind {
            TokenKind::LBrace => {
                self.advance();
                self.parse_map(None)
            }
            TokenKind::At => {
                self.advance();
                self.advance();
                if !self.current.is(TokenKind::Ident) {
                    return self.fail(ParseErrorKind::MissingTypeName("#@"));
                }
                let class_name = self.parse_class_name()?;
                self.expect(TokenKind::At, "'@' after map class name")?;
                if !self.current.is(TokenKind::LBrace) {
                    return self.unexpected("'{' to open typed map");
                }
                self.parse_map(Some(class_name))
            }
            TokenKind::Ident => {
                self.advance();
                let name = self.take().value;
                Some(match name.as_str() {
                    "this" => Expr::ThisVarRef,
                    "root" => Expr::RootVarRef,
                    _ => Expr::VarRef(name),
                })
            }
            _ => {
                self.advance();
                self.unexpected("variable name after '#'")
            }
        }
    }

    /// `{ a, b }` is a list; `{ k : v, ... }` is a map.
    fn parse_list_or_map(&mut self) -> Option<Expr> {
        self.advance();
        if self.current.is(TokenKind::RBrace) {
            self.advance();
            return Some(Expr::List(Vec::new()));
        }

        let first = self.parse_assignment()?;
        if self.current.is(TokenKind::Colon) {
            self.advance();
            let value = self.parse_assignment()?;
            let mut entries = vec![Expr::KeyValue {
                key: Box::new(first),
                value: Some(Box::new(value)),
            }];
            while self.current.is(TokenKind::Comma) {
                self.advance();
                entries.push(self.parse_key_value()?);
            }
            self.expect_closing(TokenKind::RBrace, '}', "map literal")?;
            return Some(Expr::Map {
                class_name: None,
                entries,
            });
        }

        let mut items = vec![first];
        while self.current.is(TokenKind::Comma) {
            self.advance();
            items.push(self.parse_assignment()?);
        }
        self.expect_closing(TokenKind::RBrace, '}', "list literal")?;
        Some(Expr::List(items))
    }

    /// Map body; `{` is current.
    fn parse_map(&mut self, class_name: Option<String>) -> Option<Expr> {
        self.advance();

        let mut entries = Vec::new();
        if !self.current.is(TokenKind::RBrace) {
            loop {
                entries.push(self.parse_key_value()?);
                if !self.current.is(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect_closing(TokenKind::RBrace, '}', "map literal")?;

        Some(Expr::Map {
            class_name,
            entries,
        })
    }

    fn parse_key_value(&mut self) -> Option<Expr> {
        let key = self.parse_assignment()?;

        let value = if self.current.is(TokenKind::Colon) {
            self.advance();
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };

        Some(Expr::KeyValue {
            key: Box::new(key),
            value,
        })
    }

    /// Comma-separated assignment-level expressions up to `close`, which is
    /// left unconsumed.
    fn parse_elements(&mut self, close: TokenKind) -> Option<Vec<Expr>> {
        let mut items = Vec::new();
        if self.current.is(close) {
            return Some(items);
        }

        loop {
            items.push(self.parse_assignment()?);
            if !self.current.is(TokenKind::Comma) {
                return Some(items);
            }
            self.advance();
        }
    }

    /// Argument list after `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Option<Vec<Expr>> {
        let args = self.parse_elements(TokenKind::RParen)?;
        self.expect_closing(TokenKind::RParen, ')', "argument list")?;
        Some(args)
    }

    /// Dotted class name starting at the current identifier; `$` separates
    /// inner classes.
    fn parse_class_name(&mut self) -> Option<String> {
        let mut name = self.take().value;
        let mut depth = 0;

        while matches!(self.current.kind, TokenKind::Dot | TokenKind::Dollar) {
            depth += 1;
            if depth > self.limits.max_class_name_depth {
                let limit = self.limits.max_class_name_depth;
                return self.fail(ParseErrorKind::ClassNameTooDeep(limit));
            }

            let separator = self.take().value;
            if !self.current.is(TokenKind::Ident) {
                return self.unexpected("identifier in class name");
            }
            name.push_str(&separator);
            name.push_str(&self.take().value);
        }
        Some(name)
    }

    /// `new T(args)`, `new T[size]` or `new T[] { elements }`.
    fn parse_constructor(&mut self) -> Option<Expr> {
        self.advance();
        if !self.current.is(TokenKind::Ident) {
            return self.fail(ParseErrorKind::MissingTypeName("new"));
        }
        let class_name = self.parse_class_name()?;

        match self.current.kind {
            TokenKind::LParen => {
                self.advance();
                let args = self.parse_arguments()?;
                Some(Expr::Ctor {
                    class_name,
                    args,
                    is_array: false,
                })
            }
            TokenKind::LBracket => {
                self.advance();

                let arg = if self.current.is(TokenKind::RBracket) {
                    self.advance();
                    if !self.current.is(TokenKind::LBrace) {
                        return self.unexpected("'{' to open array initialiser");
                    }
                    self.advance();
                    let items = self.parse_elements(TokenKind::RBrace)?;
                    self.expect_closing(TokenKind::RBrace, '}', "array initialiser")?;
                    Expr::List(items)
                } else {
                    let size = self.parse_assignment()?;
                    self.expect_closing(TokenKind::RBracket, ']', "array size")?;
                    size
                };

                Some(Expr::Ctor {
                    class_name,
                    args: vec![arg],
                    is_array: true,
                })
            }
            _ => self.unexpected("'(' or '[' after constructor class name"),
        }
    }

    /// `@Class@field`, `@Class@method(args)` or `@@method(args)`; `@` is
    /// current.
    fn parse_static_reference(&mut self) -> Option<Expr> {
        self.advance();

        if self.current.is(TokenKind::At) {
            self.advance();
            if !self.current.is(TokenKind::Ident) {
                return self.fail(ParseErrorKind::MissingMemberName);
            }
            if !self.peek.is(TokenKind::LParen) {
                return self.fail(ParseErrorKind::StaticFieldViaShortcut);
            }
            let method = self.take().value;
            self.advance();
            let args = self.parse_arguments()?;
            return Some(Expr::StaticMethod {
                class_name: MATH_CLASS.to_string(),
                method,
                args,
            });
        }

        if !self.current.is(TokenKind::Ident) {
            return self.fail(ParseErrorKind::MissingTypeName("@"));
        }
        let class_name = self.parse_class_name()?;
        self.expect(TokenKind::At, "'@' after class name")?;

        if !self.current.is(TokenKind::Ident) {
            return self.fail(ParseErrorKind::MissingMemberName);
        }
        let member = self.take().value;

        if self.current.is(TokenKind::LParen) {
            self.advance();
            let args = self.parse_arguments()?;
            return Some(Expr::StaticMethod {
                class_name,
                method: member,
                args,
            });
        }
        Some(Expr::StaticField {
            class_name,
            field: member,
        })
    }

    /// `:[body]`; `:` is current.
    fn parse_lambda(&mut self) -> Option<Expr> {
        self.advance();
        self.expect(TokenKind::LBracket, "'[' to open lambda body")?;

        let body = self.parse_sequence()?;
        self.expect_closing(TokenKind::RBracket, ']', "lambda body")?;
        Some(Expr::Lambda(Box::new(body)))
    }
}

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Lt => Some(BinOp::Less),
        TokenKind::Gt => Some(BinOp::Greater),
        TokenKind::LtEq => Some(BinOp::LessEq),
        TokenKind::GtEq => Some(BinOp::GreaterEq),
        TokenKind::In => Some(BinOp::In),
        TokenKind::NotIn => Some(BinOp::NotIn),
        _ => None,
    }
}

fn shift_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Shl => Some(BinOp::ShiftLeft),
        TokenKind::Shr => Some(BinOp::ShiftRight),
        TokenKind::Ushr => Some(BinOp::UnsignedShiftRight),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Subtract),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Star => Some(BinOp::Multiply),
        TokenKind::Slash => Some(BinOp::Divide),
        TokenKind::Percent => Some(BinOp::Remainder),
        _ => None,
    }
}

/// Wraps the operand `depth` steps down the left spine of `expr` in `!`.
fn negate_leftmost(mut expr: Expr, depth: usize) -> Expr {
    let mut slot = &mut expr;
    for _ in 0..depth {
        slot = match slot {
            Expr::Binary { lhs, .. } => &mut **lhs,
            other => other,
        };
    }
    let operand = mem::replace(slot, Expr::constant(Literal::Null, "null"));
    *slot = Expr::unary(UnaryOp::Not, operand);
    expr
}
