/// Binary operators, one per canonical node tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    /// `||`, `or`
    Or,
    /// `&&`, `and`
    And,

    // Bitwise
    /// `|`, `bor`
    BitOr,
    /// `^`, `xor`
    Xor,
    /// `&`, `band`
    BitAnd,

    // Equality
    /// `==`, `eq`
    Eq,
    /// `!=`, `neq`
    NotEq,

    // Relational
    /// `<`, `lt`
    Less,
    /// `>`, `gt`
    Greater,
    /// `<=`, `lte`
    LessEq,
    /// `>=`, `gte`
    GreaterEq,
    /// `in`
    In,
    /// `not in`
    NotIn,

    // Shift
    /// `<<`, `shl`
    ShiftLeft,
    /// `>>`, `shr`
    ShiftRight,
    /// `>>>`, `ushr`
    UnsignedShiftRight,

    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Remainder,
}

impl BinOp {
    pub fn tag(self) -> &'static str {
        match self {
            BinOp::Or => "ASTOr",
            BinOp::And => "ASTAnd",
            BinOp::BitOr => "ASTBitOr",
            BinOp::Xor => "ASTXor",
            BinOp::BitAnd => "ASTBitAnd",
            BinOp::Eq => "ASTEq",
            BinOp::NotEq => "ASTNotEq",
            BinOp::Less => "ASTLess",
            BinOp::Greater => "ASTGreater",
            BinOp::LessEq => "ASTLessEq",
            BinOp::GreaterEq => "ASTGreaterEq",
            BinOp::In => "ASTIn",
            BinOp::NotIn => "ASTNotIn",
            BinOp::ShiftLeft => "ASTShiftLeft",
            BinOp::ShiftRight => "ASTShiftRight",
            BinOp::UnsignedShiftRight => "ASTUnsignedShiftRight",
            BinOp::Add => "ASTAdd",
            BinOp::Subtract => "ASTSubtract",
            BinOp::Multiply => "ASTMultiply",
            BinOp::Divide => "ASTDivide",
            BinOp::Remainder => "ASTRemainder",
        }
    }

    /// Symbolic spelling, used when printing fragments.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::BitOr => "|",
            BinOp::Xor => "^",
            BinOp::BitAnd => "&",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::In => "in",
            BinOp::NotIn => "not in",
            BinOp::ShiftLeft => "<<",
            BinOp::ShiftRight => ">>",
            BinOp::UnsignedShiftRight => ">>>",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Remainder => "%",
        }
    }

    /// Binding strength; higher binds tighter. Levels follow the parser's
    /// cascade, from logical-or (4) to multiplicative (13).
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 4,
            BinOp::And => 5,
            BinOp::BitOr => 6,
            BinOp::Xor => 7,
            BinOp::BitAnd => 8,
            BinOp::Eq | BinOp::NotEq => 9,
            BinOp::Less
            | BinOp::Greater
            | BinOp::LessEq
            | BinOp::GreaterEq
            | BinOp::In
            | BinOp::NotIn => 10,
            BinOp::ShiftLeft | BinOp::ShiftRight | BinOp::UnsignedShiftRight => 11,
            BinOp::Add | BinOp::Subtract => 12,
            BinOp::Multiply | BinOp::Divide | BinOp::Remainder => 13,
        }
    }
}

/// Prefix operators. Unary `+` never reaches the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Negate,
    /// `!`, `not`
    Not,
    /// `~`
    BitNegate,
}

impl UnaryOp {
    pub fn tag(self) -> &'static str {
        match self {
            UnaryOp::Negate => "ASTNegate",
            UnaryOp::Not => "ASTNot",
            UnaryOp::BitNegate => "ASTBitNegate",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNegate => "~",
        }
    }
}

/// Selection variants, chosen by the marker after `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectKind {
    /// `{? pred}`
    All,
    /// `{^ pred}`
    First,
    /// `{$ pred}`
    Last,
}

impl SelectKind {
    pub fn tag(self) -> &'static str {
        match self {
            SelectKind::All => "ASTSelect",
            SelectKind::First => "ASTSelectFirst",
            SelectKind::Last => "ASTSelectLast",
        }
    }

    pub fn marker(self) -> char {
        match self {
            SelectKind::All => '?',
            SelectKind::First => '^',
            SelectKind::Last => '$',
        }
    }
}
