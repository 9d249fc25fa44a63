use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use rust_decimal::Decimal;

/// Decoded value of an `ASTConst` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unsuffixed integer that fits in 32 bits
    Integer(i32),
    /// `l`/`L` suffix, or an unsuffixed integer too wide for 32 bits
    Long(i64),
    /// `h`/`H` suffix
    BigInteger(BigInt),
    /// Unsuffixed or `d`/`D` floating-point literal
    Double(f64),
    /// `f`/`F` suffix
    Float(f32),
    /// `b`/`B` suffix
    BigDecimal(Decimal),
    String(String),
    Char(char),
    Boolean(bool),
    Null,
    /// `$` as a primary, or the `^` `|` `$` of a dynamic subscript
    Symbol(char),
}

fn split_suffix(raw: &str, suffixes: &[char]) -> (String, Option<char>) {
    match raw.chars().last() {
        Some(last) if suffixes.contains(&last) => {
            (raw[..raw.len() - 1].to_string(), Some(last.to_ascii_lowercase()))
        }
        _ => (raw.to_string(), None),
    }
}

impl Literal {
    /// Decodes integer literal text (`42`, `0x1F`, `017`, `9L`, `10h`).
    ///
    /// Returns `None` when the digits do not fit the literal's sort.
    pub fn from_integer_text(raw: &str) -> Option<Literal> {
        let (body, suffix) = split_suffix(raw, &['l', 'L', 'h', 'H']);

        let (digits, radix) = if let Some(hex) = body.strip_prefix("0x").or(body.strip_prefix("0X")) {
            (hex, 16)
        } else if body.len() > 1 && body.starts_with('0') {
            (&body[1..], 8)
        } else {
            (body.as_str(), 10)
        };

        let value = BigInt::parse_bytes(digits.as_bytes(), radix)?;
        match suffix {
            Some('h') => Some(Literal::BigInteger(value)),
            Some(_) => i64::try_from(&value).ok().map(Literal::Long),
            None => match i32::try_from(&value) {
                Ok(n) => Some(Literal::Integer(n)),
                Err(_) => i64::try_from(&value).ok().map(Literal::Long),
            },
        }
    }

    /// Decodes floating-point literal text (`1.5`, `.5`, `12.`, `1e3`,
    /// `2.5f`, `1.0B`).
    pub fn from_float_text(raw: &str) -> Option<Literal> {
        let (body, suffix) = split_suffix(raw, &['d', 'D', 'f', 'F', 'b', 'B']);

        match suffix {
            Some('f') => body.parse::<f32>().ok().map(Literal::Float),
            Some('b') => parse_decimal(&body).map(Literal::BigDecimal),
            _ => body.parse::<f64>().ok().map(Literal::Double),
        }
    }

    /// Name of the value's sort, as reported in JSON output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Integer(_) => "Integer",
            Literal::Long(_) => "Long",
            Literal::BigInteger(_) => "BigInteger",
            Literal::Double(_) => "Double",
            Literal::Float(_) => "Float",
            Literal::BigDecimal(_) => "BigDecimal",
            Literal::String(_) => "String",
            Literal::Char(_) => "Character",
            Literal::Boolean(_) => "Boolean",
            Literal::Null => "null",
            Literal::Symbol(_) => "Symbol",
        }
    }
}

fn parse_decimal(body: &str) -> Option<Decimal> {
    let mut text = body.trim_end_matches('.').to_string();
    if text.starts_with('.') {
        text.insert(0, '0');
    }
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text.replace("e+", "e").replace("E+", "E")).ok()
    } else {
        Decimal::from_str(&text).ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Long(n) => write!(f, "{}", n),
            Literal::BigInteger(n) => write!(f, "{}", n),
            // Debug formatting keeps the fractional part: 12.0, not 12
            Literal::Double(n) => write!(f, "{:?}", n),
            Literal::Float(n) => write!(f, "{:?}", n),
            Literal::BigDecimal(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
            Literal::Char(c) | Literal::Symbol(c) => write!(f, "{}", c),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}
