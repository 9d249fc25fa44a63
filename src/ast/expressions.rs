use super::literal::Literal;
use super::operators::{BinOp, SelectKind, UnaryOp};

/// An OGNL expression tree node.
///
/// Each variant maps to one canonical node tag (see [`Expr::tag`]). Steps of
/// a navigation chain carry no receiver; the enclosing [`Expr::Chain`]
/// supplies it positionally.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal constant, tag `ASTConst`
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "hello"
    /// 'c'
    /// 1.5f
    /// null
    /// $
    /// ```
    Const { value: Literal, raw: String },

    /// Lambda literal `:[body]`, tagged `ASTConst` like other constants
    ///
    /// # Examples
    /// ```text
    /// :[#this * 2]
    /// ```
    Lambda(Box<Expr>),

    /// Property access, tag `ASTProperty`
    ///
    /// A bare identifier carries a string constant holding its name. An
    /// index step carries the index expression with `indexed` set; dynamic
    /// subscripts carry a [`Literal::Symbol`] constant.
    ///
    /// # Examples
    /// ```text
    /// name
    /// [0]
    /// ["key"]
    /// [^]
    /// ```
    Property { name: Box<Expr>, indexed: bool },

    /// `#name`, tag `ASTVarRef`
    VarRef(String),
    /// `#this`
    ThisVarRef,
    /// `#root`
    RootVarRef,

    /// Navigation chain of at least two steps, tag `ASTChain`
    ///
    /// # Examples
    /// ```text
    /// user.address.city
    /// list[0].name
    /// #var.{? #this > 1 }
    /// ```
    Chain(Vec<Expr>),

    /// Method call without explicit receiver, tag `ASTMethod`
    ///
    /// # Examples
    /// ```text
    /// size()
    /// get("key", 1)
    /// ```
    Method { name: String, args: Vec<Expr> },

    /// Constructor, tag `ASTCtor`
    ///
    /// For arrays the single argument is either a size expression
    /// (`new int[5]`) or an `ASTList` initialiser (`new int[] { 1, 2 }`).
    Ctor {
        class_name: String,
        args: Vec<Expr>,
        is_array: bool,
    },

    /// `@Class@FIELD`, tag `ASTStaticField`
    StaticField { class_name: String, field: String },

    /// `@Class@method(args)`, tag `ASTStaticMethod`
    ///
    /// # Examples
    /// ```text
    /// @java.lang.Math@max(1, 2)
    /// @@min(3, 4)
    /// ```
    StaticMethod {
        class_name: String,
        method: String,
        args: Vec<Expr>,
    },

    /// `lhs = rhs`, tag `ASTAssign`
    Assign { lhs: Box<Expr>, rhs: Box<Expr> },

    /// Comma-separated expressions, tag `ASTSequence`
    Sequence(Vec<Expr>),

    /// `test ? then : otherwise`, tag `ASTTest`
    Test {
        test: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },

    /// Binary operation; the tag comes from the operator
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Prefix operation; the tag comes from the operator
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `operand instanceof type`, tag `ASTInstanceof`
    Instanceof { operand: Box<Expr>, type_name: String },

    /// `{ a, b, c }`, tag `ASTList`
    List(Vec<Expr>),

    /// `#{ k : v }` or `#@Class@{ k : v }`, tag `ASTMap`
    ///
    /// Entries are always [`Expr::KeyValue`] nodes.
    Map {
        class_name: Option<String>,
        entries: Vec<Expr>,
    },

    /// Map entry, tag `ASTKeyValue`; a key written without `:` has no value
    KeyValue { key: Box<Expr>, value: Option<Box<Expr>> },

    /// `{ body }` after a chain, tag `ASTProject`
    Project(Box<Expr>),

    /// `{? pred }`, `{^ pred }` or `{$ pred }`; the tag comes from the kind
    Select { kind: SelectKind, predicate: Box<Expr> },

    /// `target(arg)` applied to a value reference, tag `ASTEval`
    ///
    /// # Examples
    /// ```text
    /// #fact(30)
    /// :[#this + 1](41)
    /// ```
    Eval { target: Box<Expr>, arg: Box<Expr> },
}

impl Expr {
    pub fn constant(value: Literal, raw: impl Into<String>) -> Self {
        Expr::Const {
            value,
            raw: raw.into(),
        }
    }

    /// String constant; also the name node of a bare property.
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = format!("\"{}\"", value);
        Expr::constant(Literal::String(value), raw)
    }

    pub fn symbol(symbol: char) -> Self {
        Expr::constant(Literal::Symbol(symbol), symbol.to_string())
    }

    /// Bare property named by an identifier.
    pub fn property(name: impl Into<String>) -> Self {
        Expr::Property {
            name: Box::new(Expr::string(name)),
            indexed: false,
        }
    }

    pub fn index(index: Expr) -> Self {
        Expr::Property {
            name: Box::new(index),
            indexed: true,
        }
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Wraps navigation steps; a single step is returned as is.
    pub fn chain(mut steps: Vec<Expr>) -> Option<Self> {
        match steps.len() {
            0 => None,
            1 => steps.pop(),
            _ => Some(Expr::Chain(steps)),
        }
    }

    /// Canonical node tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Expr::Const { .. } | Expr::Lambda(_) => "ASTConst",
            Expr::Property { .. } => "ASTProperty",
            Expr::VarRef(_) => "ASTVarRef",
            Expr::ThisVarRef => "ASTThisVarRef",
            Expr::RootVarRef => "ASTRootVarRef",
            Expr::Chain(_) => "ASTChain",
            Expr::Method { .. } => "ASTMethod",
            Expr::Ctor { .. } => "ASTCtor",
            Expr::StaticField { .. } => "ASTStaticField",
            Expr::StaticMethod { .. } => "ASTStaticMethod",
            Expr::Assign { .. } => "ASTAssign",
            Expr::Sequence(_) => "ASTSequence",
            Expr::Test { .. } => "ASTTest",
            Expr::Binary { op, .. } => op.tag(),
            Expr::Unary { op, .. } => op.tag(),
            Expr::Instanceof { .. } => "ASTInstanceof",
            Expr::List(_) => "ASTList",
            Expr::Map { .. } => "ASTMap",
            Expr::KeyValue { .. } => "ASTKeyValue",
            Expr::Project(_) => "ASTProject",
            Expr::Select { kind, .. } => kind.tag(),
            Expr::Eval { .. } => "ASTEval",
        }
    }

    /// Child nodes in canonical order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Const { .. }
            | Expr::VarRef(_)
            | Expr::ThisVarRef
            | Expr::RootVarRef
            | Expr::StaticField { .. } => Vec::new(),
            Expr::Lambda(body) | Expr::Project(body) => vec![body.as_ref()],
            Expr::Property { name, .. } => vec![name.as_ref()],
            Expr::Chain(items) | Expr::Sequence(items) | Expr::List(items) => items.iter().collect(),
            Expr::Method { args, .. } | Expr::Ctor { args, .. } | Expr::StaticMethod { args, .. } => {
                args.iter().collect()
            }
            Expr::Map { entries, .. } => entries.iter().collect(),
            Expr::Assign { lhs, rhs } | Expr::Binary { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Test {
                test,
                then,
                otherwise,
            } => vec![test.as_ref(), then.as_ref(), otherwise.as_ref()],
            Expr::Unary { operand, .. } | Expr::Instanceof { operand, .. } => vec![operand.as_ref()],
            Expr::KeyValue { key, value } => {
                let mut children = vec![key.as_ref()];
                children.extend(value.as_deref());
                children
            }
            Expr::Select { predicate, .. } => vec![predicate.as_ref()],
            Expr::Eval { target, arg } => vec![target.as_ref(), arg.as_ref()],
        }
    }

    /// True for nodes that `(arg)` applies to as an eval rather than a
    /// method call: variables and constants, lambdas included.
    pub fn is_value_reference(&self) -> bool {
        matches!(
            self,
            Expr::VarRef(_)
                | Expr::ThisVarRef
                | Expr::RootVarRef
                | Expr::Const { .. }
                | Expr::Lambda(_)
        )
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}
