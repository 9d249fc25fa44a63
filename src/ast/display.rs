//! Source-like fragments for expression nodes.
//!
//! `Display` on [`Expr`] renders the canonical fragment of a node: operators
//! in symbolic form, nested binary operands parenthesised, integers in
//! decimal and floats with a fractional part.

use std::fmt::{self, Write};

use super::expressions::Expr;
use super::literal::Literal;

/// Nodes that need parentheses when they appear as an operand.
fn is_compound(expr: &Expr) -> bool {
    matches!(expr, Expr::Binary { .. } | Expr::Test { .. })
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if matches!(expr, Expr::Binary { .. }) {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Projection and selection bodies parenthesise anything with operators.
fn write_body(f: &mut fmt::Formatter<'_>, body: &Expr) -> fmt::Result {
    match body {
        Expr::Binary { .. } | Expr::Test { .. } | Expr::Assign { .. } | Expr::Sequence(_) => {
            write!(f, "({})", body)
        }
        _ => write!(f, "{}", body),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_braced(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("{  }");
    }
    f.write_str("{ ")?;
    write_list(f, items)?;
    f.write_str(" }")
}

/// Suffixed numbers print as written with an upper-case suffix; `2.b`
/// prints as `2B`.
fn write_suffixed(f: &mut fmt::Formatter<'_>, raw: &str) -> fmt::Result {
    let Some(suffix) = raw.chars().last() else {
        return Ok(());
    };
    let mut body = &raw[..raw.len() - suffix.len_utf8()];
    let suffix = suffix.to_ascii_uppercase();
    if suffix == 'B' {
        body = body.strip_suffix('.').unwrap_or(body);
    }
    write!(f, "{}{}", body, suffix)
}

/// Quoted text with the quote, backslash and control characters escaped so
/// the fragment reads back as the same literal.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    f.write_char(quote)?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

fn write_constant(f: &mut fmt::Formatter<'_>, value: &Literal, raw: &str) -> fmt::Result {
    let suffixed = raw
        .chars()
        .last()
        .is_some_and(|c| matches!(c, 'l' | 'L' | 'h' | 'H' | 'b' | 'B'));

    match value {
        Literal::Long(_) | Literal::BigInteger(_) | Literal::BigDecimal(_) if suffixed => {
            write_suffixed(f, raw)
        }
        Literal::String(s) => write_quoted(f, s, '"'),
        Literal::Char(c) => write_quoted(f, c.encode_utf8(&mut [0; 4]), '\''),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const { value, raw } => write_constant(f, value, raw),
            Expr::Lambda(body) => write!(f, ":[{}]", body),
            Expr::Property {
                name,
                indexed: false,
            } => match name.as_ref() {
                Expr::Const {
                    value: Literal::String(s),
                    ..
                } => f.write_str(s),
                other => write!(f, "{}", other),
            },
            Expr::Property {
                name,
                indexed: true,
            } => write!(f, "[{}]", name),
            Expr::VarRef(name) => write!(f, "#{}", name),
            Expr::ThisVarRef => f.write_str("#this"),
            Expr::RootVarRef => f.write_str("#root"),
            Expr::Chain(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if i == 0 {
                        if is_compound(step) {
                            write!(f, "({})", step)?;
                        } else {
                            write!(f, "{}", step)?;
                        }
                    } else if matches!(step, Expr::Property { indexed: true, .. }) {
                        write!(f, "{}", step)?;
                    } else if is_compound(step) {
                        write!(f, ".({})", step)?;
                    } else {
                        write!(f, ".{}", step)?;
                    }
                }
                Ok(())
            }
            Expr::Method { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Ctor {
                class_name,
                args,
                is_array: true,
            } => match args.first() {
                Some(Expr::List(items)) => {
                    write!(f, "new {}[]", class_name)?;
                    write_braced(f, items)
                }
                Some(size) => write!(f, "new {}[{}]", class_name, size),
                None => write!(f, "new {}[]{{  }}", class_name),
            },
            Expr::Ctor {
                class_name,
                args,
                is_array: false,
            } => {
                write!(f, "new {}(", class_name)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::StaticField { class_name, field } => write!(f, "@{}@{}", class_name, field),
            Expr::StaticMethod {
                class_name,
                method,
                args,
            } => {
                write!(f, "@{}@{}(", class_name, method)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Assign { lhs, rhs } => write!(f, "{} = {}", lhs, rhs),
            Expr::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if is_compound(item) {
                        write!(f, "({})", item)?;
                    } else {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Expr::Test {
                test,
                then,
                otherwise,
            } => {
                write_operand(f, test)?;
                write!(f, " ? {} : {}", then, otherwise)
            }
            Expr::Binary { op, lhs, rhs } => {
                write_operand(f, lhs)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, rhs)
            }
            Expr::Unary { op, operand } => {
                f.write_str(op.symbol())?;
                write_operand(f, operand)
            }
            Expr::Instanceof { operand, type_name } => {
                write_operand(f, operand)?;
                write!(f, " instanceof {}", type_name)
            }
            Expr::List(items) => write_braced(f, items),
            Expr::Map {
                class_name,
                entries,
            } => {
                f.write_str("#")?;
                if let Some(class_name) = class_name {
                    write!(f, "@{}@", class_name)?;
                }
                write_braced(f, entries)
            }
            Expr::KeyValue { key, value } => match value {
                Some(value) => write!(f, "{} : {}", key, value),
                None => write!(f, "{} : null", key),
            },
            Expr::Project(body) => {
                f.write_str("{")?;
                write_body(f, body)?;
                f.write_str("}")
            }
            Expr::Select { kind, predicate } => {
                write!(f, "{{{} ", kind.marker())?;
                write_body(f, predicate)?;
                f.write_str("}")
            }
            Expr::Eval { target, arg } => write!(f, "({})({})", target, arg),
        }
    }
}
