//! # OGNL Abstract Syntax Tree
//!
//! This module defines the token and tree types for OGNL (Object-Graph
//! Navigation Language) expressions. The tree mirrors, node for node, the
//! shape produced by the canonical OGNL grammar, and every node reports the
//! canonical tag (`ASTChain`, `ASTProperty`, `ASTEval`, ...) through
//! [`Expr::tag`].
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[literal]** - Decoded constant values and numeric literal decoding
//! - **[expressions]** - The [`Expr`] node type
//! - **[operators]** - Binary and unary operators, selection variants
//! - **[display]** - Canonical source-like fragments for each node
//!
//! ## Core Concepts
//!
//! ### Navigation Chains
//!
//! A chain is a flat list of steps. Steps carry no receiver of their own;
//! each applies to the result of the step before it:
//!
//! ```text
//! user.orders[0].total     ASTChain(ASTProperty, ASTProperty, ASTProperty, ASTProperty)
//! ```
//!
//! A chain always has at least two steps. A lone primary is never wrapped.
//!
//! ### Property Names
//!
//! A property written as a bare identifier keeps its name as a string
//! constant child:
//!
//! ```text
//! name                     ASTProperty(ASTConst "name")
//! ```
//!
//! ### Eval versus Method Call
//!
//! `(arg)` after a single value reference (variable, constant or lambda)
//! applies it as `ASTEval`; anywhere else it is a receiver-less `ASTMethod`:
//!
//! ```text
//! #fact(30)                ASTEval(ASTVarRef, ASTConst)
//! :[#this + 1](41)         ASTEval(ASTConst, ASTConst)
//! ```
//!
//! ## Examples
//!
//! ### Projection and Selection
//!
//! ```text
//! users.{name}
//! users.{? #this.age > 18}
//! users.{^ #this.active}
//! ```
//!
//! ### Static References and Constructors
//!
//! ```text
//! @java.lang.Math@PI
//! @@max(3, 4)
//! new java.util.ArrayList()
//! new int[] { 10, 20 }
//! ```
//!
//! ### Maps and Lambdas
//!
//! ```text
//! #{ "a" : 1, "b" }
//! #@java.util.TreeMap@{ "k" : "v" }
//! #fact = :[#this <= 1 ? 1 : #this * #fact(#this - 1)], #fact(5)
//! ```
pub mod tokens;
pub mod literal;
pub mod expressions;
pub mod operators;
pub mod display;

pub use tokens::{Token, TokenKind};
pub use literal::Literal;
pub use expressions::Expr;
pub use operators::{BinOp, SelectKind, UnaryOp};
