use thiserror::Error;

use crate::ast::tokens::{lookup_keyword, Token, TokenKind};

/// 1-based line and column of a character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

/// Problems found while scanning. The lexer reports them on an
/// [`TokenKind::Illegal`] token instead of stopping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("malformed numeric literal '{0}'")]
    MalformedNumber(String),
}

#[derive(Clone, Copy)]
struct Checkpoint {
    position: usize,
    line: usize,
    column: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    is_letter(ch) || ch.is_ascii_digit()
}

fn is_float_suffix(ch: char) -> bool {
    matches!(ch, 'd' | 'D' | 'f' | 'F' | 'b' | 'B')
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn location(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r' | '\x0c') = self.current_char() {
            self.advance();
        }
    }

    /// Consumes characters while `pred` holds and returns how many were taken.
    fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.current_char().is_some_and(&pred) {
            self.advance();
            count += 1;
        }
        count
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        self.skip_while(is_identifier_char);
        self.slice(start)
    }

    fn read_word(&mut self, pos: Position) -> Token {
        let start = self.position;
        let ident = self.read_identifier();

        match lookup_keyword(&ident) {
            Some(TokenKind::Not) => self.read_not(start, pos, ident),
            Some(kind) => Token::new(kind, ident.clone(), ident, pos),
            None => Token::new(TokenKind::Ident, ident.clone(), ident, pos),
        }
    }

    /// `not` followed by the word `in` fuses into one `not in` token.
    fn read_not(&mut self, start: usize, pos: Position, ident: String) -> Token {
        let checkpoint = self.checkpoint();
        self.skip_whitespace();

        if self.current_char().is_some_and(is_letter) && self.read_identifier() == "in" {
            return Token::new(TokenKind::NotIn, "not in", self.slice(start), pos);
        }

        self.rewind(checkpoint);
        Token::new(TokenKind::Not, ident.clone(), ident, pos)
    }

    fn fraction_follows(&self) -> bool {
        match self.peek_char(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some(c) if is_float_suffix(c) => !self.peek_char(2).is_some_and(is_identifier_char),
            Some(c) => !is_letter(c) && c != '.',
            None => true,
        }
    }

    fn exponent_follows(&self) -> bool {
        match self.peek_char(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.peek_char(2).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn read_number(&mut self, pos: Position) -> Token {
        let start = self.position;
        let kind = self.scan_number(start);
        let raw = self.slice(start);

        match kind {
            Ok(kind) => Token::new(kind, raw.clone(), raw, pos),
            Err(err) => Token::illegal(err, raw, pos),
        }
    }

    fn scan_number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        if self.current_char() == Some('0') && matches!(self.peek_char(1), Some('x' | 'X')) {
            self.advance();
            self.advance();
            if self.skip_while(|c| c.is_ascii_hexdigit()) == 0 {
                return Err(LexError::MalformedNumber(self.slice(start)));
            }
            if let Some('l' | 'L' | 'h' | 'H') = self.current_char() {
                self.advance();
            }
            return Ok(TokenKind::IntLiteral);
        }

        let octal =
            self.current_char() == Some('0') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit());
        self.skip_while(|c| c.is_ascii_digit());

        let mut is_float = false;
        if self.current_char() == Some('.') && self.fraction_follows() {
            is_float = true;
            self.advance();
            self.skip_while(|c| c.is_ascii_digit());
        }

        if let Some('e' | 'E') = self.current_char() {
            if self.exponent_follows() {
                is_float = true;
                self.advance();
                if let Some('+' | '-') = self.current_char() {
                    self.advance();
                }
                self.skip_while(|c| c.is_ascii_digit());
            }
        }

        match self.current_char() {
            Some(c) if is_float_suffix(c) => {
                self.advance();
                return Ok(TokenKind::FloatLiteral);
            }
            Some('l' | 'L' | 'h' | 'H') if !is_float => self.advance(),
            _ => {}
        }

        if is_float {
            return Ok(TokenKind::FloatLiteral);
        }

        let text = self.slice(start);
        if octal && text.contains(['8', '9']) {
            return Err(LexError::MalformedNumber(text));
        }
        Ok(TokenKind::IntLiteral)
    }

    /// Decodes the escape sequence after a backslash.
    fn read_escape(&mut self, unterminated: LexError) -> Result<char, LexError> {
        let Some(ch) = self.current_char() else {
            return Err(unterminated);
        };
        self.advance();

        let decoded = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            '\\' | '\'' | '"' | '`' => ch,
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .current_char()
                        .and_then(|c| c.to_digit(16))
                        .ok_or(LexError::InvalidUnicodeEscape)?;
                    code = code * 16 + digit;
                    self.advance();
                }
                char::from_u32(code).ok_or(LexError::InvalidUnicodeEscape)?
            }
            '0'..='7' => {
                // \0 through \377; a leading 4-7 allows only two digits
                let max_digits = if ch <= '3' { 3 } else { 2 };
                let mut code = ch as u32 - '0' as u32;
                for _ in 1..max_digits {
                    match self.current_char().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            self.advance();
                        }
                        None => break,
                    }
                }
                char::from(code as u8)
            }
            other => return Err(LexError::InvalidEscape(other)),
        };
        Ok(decoded)
    }

    /// Reads a literal delimited by `quote` and returns its decoded contents.
    fn read_quoted(&mut self, quote: char) -> Result<String, LexError> {
        let unterminated = if quote == '"' {
            LexError::UnterminatedString
        } else {
            LexError::UnterminatedChar
        };
        let mut value = String::new();
        let mut first_error = None;
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                None => return Err(first_error.unwrap_or(unterminated)),
                Some(c) if c == quote => {
                    self.advance();
                    return match first_error {
                        Some(err) => Err(err),
                        None => Ok(value),
                    };
                }
                Some('\\') => {
                    self.advance();
                    match self.read_escape(unterminated.clone()) {
                        Ok(ch) => value.push(ch),
                        Err(err) if err == unterminated => return Err(first_error.unwrap_or(err)),
                        Err(err) => {
                            first_error.get_or_insert(err);
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_string_literal(&mut self, pos: Position) -> Token {
        let start = self.position;
        let quote = self.current_char().unwrap_or('"');
        let result = self.read_quoted(quote);
        let raw = self.slice(start);

        match result {
            Ok(value) if quote == '\'' && value.chars().count() == 1 => {
                Token::new(TokenKind::CharLiteral, value, raw, pos)
            }
            Ok(value) => Token::new(TokenKind::StringLiteral, value, raw, pos),
            Err(err) => Token::illegal(err, raw, pos),
        }
    }

    fn read_back_char(&mut self, pos: Position) -> Token {
        let start = self.position;
        self.advance(); // opening back-quote

        let value = match self.current_char() {
            Some('\\') => {
                self.advance();
                self.read_escape(LexError::UnterminatedChar)
            }
            Some(c) if c != '`' => {
                self.advance();
                Ok(c)
            }
            _ => Err(LexError::UnterminatedChar),
        };

        let value = value.and_then(|ch| {
            if self.current_char() == Some('`') {
                self.advance();
                Ok(ch)
            } else {
                Err(LexError::UnterminatedChar)
            }
        });

        let raw = self.slice(start);
        match value {
            Ok(ch) => Token::new(TokenKind::BackCharLiteral, ch.to_string(), raw, pos),
            Err(err) => Token::illegal(err, raw, pos),
        }
    }

    fn read_operator(&mut self, ch: char, pos: Position) -> Token {
        let start = self.position;
        let next = self.peek_char(1);

        let (kind, len) = match ch {
            '=' if next == Some('=') => (TokenKind::Eq, 2),
            '=' => (TokenKind::Assign, 1),
            '!' if next == Some('=') => (TokenKind::NotEq, 2),
            '!' => (TokenKind::Not, 1),
            '<' if next == Some('<') => (TokenKind::Shl, 2),
            '<' if next == Some('=') => (TokenKind::LtEq, 2),
            '<' => (TokenKind::Lt, 1),
            '>' if next == Some('>') && self.peek_char(2) == Some('>') => (TokenKind::Ushr, 3),
            '>' if next == Some('>') => (TokenKind::Shr, 2),
            '>' if next == Some('=') => (TokenKind::GtEq, 2),
            '>' => (TokenKind::Gt, 1),
            '&' if next == Some('&') => (TokenKind::And, 2),
            '&' => (TokenKind::BitAnd, 1),
            '|' if next == Some('|') => (TokenKind::Or, 2),
            '|' => (TokenKind::BitOr, 1),
            '^' => (TokenKind::Xor, 1),
            '~' => (TokenKind::BitNot, 1),
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' => (TokenKind::Star, 1),
            '/' => (TokenKind::Slash, 1),
            '%' => (TokenKind::Percent, 1),
            ',' => (TokenKind::Comma, 1),
            ';' => (TokenKind::Semicolon, 1),
            '?' => (TokenKind::Question, 1),
            ':' => (TokenKind::Colon, 1),
            '.' => (TokenKind::Dot, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '{' => (TokenKind::LBrace, 1),
            '}' => (TokenKind::RBrace, 1),
            '[' => (TokenKind::LBracket, 1),
            ']' => (TokenKind::RBracket, 1),
            '#' => (TokenKind::Hash, 1),
            '@' => (TokenKind::At, 1),
            '$' => (TokenKind::Dollar, 1),
            other => {
                self.advance();
                return Token::illegal(LexError::IllegalCharacter(other), other.to_string(), pos);
            }
        };

        for _ in 0..len {
            self.advance();
        }
        let text = self.slice(start);
        Token::new(kind, text.clone(), text, pos)
    }

    /// Scans the next token. Returns an `Eof` token at (and after) the end
    /// of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let pos = self.location();

        match self.current_char() {
            None => Token::new(TokenKind::Eof, "", "", pos),
            Some(ch) if is_letter(ch) => self.read_word(pos),
            Some(ch) if ch.is_ascii_digit() => self.read_number(pos),
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(pos)
            }
            Some('"' | '\'') => self.read_string_literal(pos),
            Some('`') => self.read_back_char(pos),
            Some(ch) => self.read_operator(ch, pos),
        }
    }
}

/// Yields tokens up to, not including, end of input.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_not_in_is_fused() {
        let tokens: Vec<Token> = Lexer::new("a not  in b").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::NotIn);
        assert_eq!(tokens[1].raw, "not  in");
    }

    #[test]
    fn test_not_rolls_back() {
        assert_eq!(
            kinds("not inner"),
            vec![TokenKind::Not, TokenKind::Ident]
        );
        let mut lexer = Lexer::new("not x");
        assert_eq!(lexer.next_token().kind, TokenKind::Not);
        let x = lexer.next_token();
        assert_eq!(x.value, "x");
        assert_eq!(x.position, Position { line: 1, column: 5 });
    }

    #[test]
    fn test_shift_operators() {
        assert_eq!(
            kinds("<< >> >>> <= >="),
            vec![
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::Ushr,
                TokenKind::LtEq,
                TokenKind::GtEq
            ]
        );
    }

    #[test]
    fn test_integer_then_method() {
        assert_eq!(
            kinds("5.toString()"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::RParen
            ]
        );
    }

    #[test]
    fn test_octal_escape_decodes_byte() {
        let token = Lexer::new(r#""\101\7""#).next_token();
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.value, "A\u{7}");
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens: Vec<Token> = Lexer::new("a\n  b").collect();
        assert_eq!(tokens[1].position, Position { line: 2, column: 3 });
    }
}
