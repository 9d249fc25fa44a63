//! Rendering of expression trees for people and tools.
//!
//! # Features
//!
//! - **Tree view** via [`to_tree()`] - one line per node, `TAG fragment`,
//!   children indented two spaces below their parent
//! - **Compact JSON** via [`to_json()`]
//! - **Pretty JSON** via [`to_json_pretty()`] - 2-space indentation
//!
//! Every JSON node carries `type` (the canonical tag), `fragment` and
//! `children`, plus the fields specific to its kind (`name`, `className`,
//! `operator`, `value`, ...).
//!
//! # Examples
//!
//! ```
//! use ognl_parser::parse_expression;
//! use ognl_parser::output::{to_json, to_tree};
//!
//! let expr = parse_expression("a + 1").unwrap();
//!
//! assert_eq!(
//!     to_tree(&expr),
//!     "ASTAdd a + 1\n  ASTProperty a\n    ASTConst \"a\"\n  ASTConst 1\n"
//! );
//! assert!(to_json(&expr).starts_with(r#"{"children":["#));
//! ```

use serde_json::{json, Map, Value};

use crate::ast::{Expr, Literal};

pub struct TreePrinter {
    indent: usize,
}

impl TreePrinter {
    pub fn new(indent: usize) -> Self {
        TreePrinter { indent }
    }

    pub fn print(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.print_node(expr, 0, &mut out);
        out
    }

    fn print_node(&self, expr: &Expr, depth: usize, out: &mut String) {
        out.push_str(&" ".repeat(depth * self.indent));
        out.push_str(expr.tag());
        out.push(' ');
        out.push_str(&expr.to_string());
        out.push('\n');

        for child in expr.children() {
            self.print_node(child, depth + 1, out);
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        TreePrinter::new(2)
    }
}

fn literal_value(value: &Literal) -> Value {
    match value {
        Literal::Integer(n) => json!(n),
        Literal::Long(n) => json!(n),
        Literal::Double(n) => json!(n),
        // Through the decimal text so 1.1f stays 1.1
        Literal::Float(n) => n.to_string().parse::<f64>().map_or(Value::Null, |v| json!(v)),
        Literal::Boolean(b) => json!(b),
        Literal::Null => Value::Null,
        other => json!(other.to_string()),
    }
}

/// Builds the JSON representation of a tree.
pub fn to_value(expr: &Expr) -> Value {
    let mut node = Map::new();
    node.insert("type".to_string(), json!(expr.tag()));
    node.insert("fragment".to_string(), json!(expr.to_string()));

    match expr {
        Expr::Const { value, raw } => {
            node.insert("value".to_string(), literal_value(value));
            node.insert("valueType".to_string(), json!(value.type_name()));
            node.insert("raw".to_string(), json!(raw));
        }
        Expr::Lambda(_) => {
            node.insert("lambda".to_string(), json!(true));
        }
        Expr::Property { indexed, .. } => {
            node.insert("indexed".to_string(), json!(indexed));
        }
        Expr::VarRef(name) => {
            node.insert("name".to_string(), json!(name));
        }
        Expr::Method { name, .. } => {
            node.insert("name".to_string(), json!(name));
        }
        Expr::Ctor {
            class_name,
            is_array,
            ..
        } => {
            node.insert("className".to_string(), json!(class_name));
            node.insert("isArray".to_string(), json!(is_array));
        }
        Expr::StaticField { class_name, field } => {
            node.insert("className".to_string(), json!(class_name));
            node.insert("name".to_string(), json!(field));
        }
        Expr::StaticMethod {
            class_name, method, ..
        } => {
            node.insert("className".to_string(), json!(class_name));
            node.insert("name".to_string(), json!(method));
        }
        Expr::Binary { op, .. } => {
            node.insert("operator".to_string(), json!(op.symbol()));
        }
        Expr::Unary { op, .. } => {
            node.insert("operator".to_string(), json!(op.symbol()));
        }
        Expr::Instanceof { type_name, .. } => {
            node.insert("typeName".to_string(), json!(type_name));
        }
        Expr::Map {
            class_name: Some(class_name),
            ..
        } => {
            node.insert("className".to_string(), json!(class_name));
        }
        _ => {}
    }

    let children = expr.children().into_iter().map(to_value).collect();
    node.insert("children".to_string(), Value::Array(children));
    Value::Object(node)
}

/// Renders a tree one node per line, two spaces of indentation per level.
pub fn to_tree(expr: &Expr) -> String {
    TreePrinter::default().print(expr)
}

/// Converts a tree to compact JSON.
///
/// Object keys come out sorted, so output is deterministic.
pub fn to_json(expr: &Expr) -> String {
    to_value(expr).to_string()
}

/// Converts a tree to JSON with 2-space indentation.
pub fn to_json_pretty(expr: &Expr) -> String {
    format!("{:#}", to_value(expr))
}
