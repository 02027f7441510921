// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! Expression nodes that appear in projections, predicates, group and order
//! lists.
//!
//! ## Design
//!
//! Most nodes are structural (columns, literals, operators, function calls),
//! but the upstream builder frequently hands over fragments it has already
//! rendered. Those travel as [`Expr::Raw`] and are emitted verbatim. A raw
//! fragment may hold several comma-joined expressions, e.g. an order fragment
//! `"name, created_at DESC"`.
//!
//! Subqueries are [`Expr::Subquery`] nodes holding a full
//! [`SelectStatement`](crate::SelectStatement), so they are rewritten with the
//! same rules as the statement that contains them.
//!
//! ## Examples
//!
//! ```sql
//! -- Column reference
//! users.id
//!
//! -- Function call with DISTINCT
//! COUNT(DISTINCT category)
//!
//! -- Subquery in a predicate
//! id IN (SELECT user_id FROM orders LIMIT 10)
//! ```

use serde::{Deserialize, Serialize};

use crate::query::SelectStatement;

/// A SQL expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Column reference (e.g., `table.column` or just `column`)
    Column(ColumnRef),

    /// Literal value
    Literal(Literal),

    /// Binary operation (e.g., `a + b`, `x = 5`)
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation (e.g., `-x`, `NOT a`)
    UnaryOp { op: UnaryOp, expr: Box<Expr> },

    /// Function call (e.g., `COUNT(*)`, `MAX(column)`)
    Function {
        name: String,
        args: Vec<Expr>,
        distinct: bool,
    },

    /// CAST expression
    Cast { expr: Box<Expr>, type_name: String },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// List of expressions (e.g., for IN clause)
    List(Vec<Expr>),

    /// Nested select statement
    Subquery(Box<SelectStatement>),

    /// Pre-rendered SQL fragment, emitted verbatim
    Raw(String),
}

impl Expr {
    /// Unqualified column reference
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::new(name))
    }

    /// Pre-rendered SQL fragment
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Function call without DISTINCT
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
            distinct: false,
        }
    }

    pub fn subquery(statement: SelectStatement) -> Self {
        Expr::Subquery(Box::new(statement))
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Column reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Optional table/alias name
    pub table: Option<String>,
    /// Column name
    pub column: String,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.column),
            None => self.column.clone(),
        }
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Like,
    NotLike,

    // Other
    In,
    NotIn,
    Is,
    IsNot,
}

impl BinaryOp {
    /// SQL spelling of the operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    Exists,
}
