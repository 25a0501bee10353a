//! Typed predicate expressions and their translation into WHERE clauses.

use std::fmt;
use std::ops;

use serde::{Deserialize, Serialize};

use crate::types::Value;
use crate::validate::ValidationError;

mod translate;

pub use translate::{WhereClause, translate};

/// SQL comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    /// Equal: `=`
    Eq,
    /// Not equal: `!=`
    Ne,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Ge,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Le,
}

impl CmpOp {
    /// The SQL symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

/// Arithmetic operators usable inside predicate operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
}

impl ArithOp {
    /// The SQL symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// A predicate expression tree.
///
/// Built with [`col`], [`lit`], the comparison methods, and the standard
/// operators (`+`, `-`, `*`, `/`, `!`). Nothing here touches the database;
/// [`translate`] turns the tree into a parameterized condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A column reference, validated during translation.
    Field(String),
    /// A literal value, bound as a parameter during translation.
    Literal(Value),
    /// A comparison between two operands.
    Compare {
        /// The comparison operator.
        op: CmpOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Both sub-predicates must hold.
    And(Box<Expr>, Box<Expr>),
    /// At least one sub-predicate must hold.
    Or(Box<Expr>, Box<Expr>),
    /// The sub-predicate must not hold.
    Not(Box<Expr>),
    /// An arithmetic combination of two operands.
    Arith {
        /// The arithmetic operator.
        op: ArithOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Arithmetic negation of an operand.
    Neg(Box<Expr>),
}

/// Reference a column by name.
///
/// The name is not checked here; [`translate`] validates it with the same
/// rules as any other field identifier.
#[must_use]
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Field(name.into())
}

/// Embed a literal value.
///
/// Rarely needed directly: the comparison methods accept anything
/// convertible into an expression, so `col("age").gt(18)` already wraps
/// the `18`.
#[must_use]
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

// `eq` and `ne` build comparison expressions; they do not compare two
// `Expr` values. Use `==` for structural equality.
#[allow(clippy::should_implement_trait)]
impl Expr {
    fn compare(self, op: CmpOp, rhs: impl Into<Expr>) -> Expr {
        Expr::Compare {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }

    /// `self = rhs`
    #[must_use]
    pub fn eq(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Eq, rhs)
    }

    /// `self != rhs`
    #[must_use]
    pub fn ne(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Ne, rhs)
    }

    /// `self > rhs`
    #[must_use]
    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Gt, rhs)
    }

    /// `self >= rhs`
    #[must_use]
    pub fn ge(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Ge, rhs)
    }

    /// `self < rhs`
    #[must_use]
    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Lt, rhs)
    }

    /// `self <= rhs`
    #[must_use]
    pub fn le(self, rhs: impl Into<Expr>) -> Expr {
        self.compare(CmpOp::Le, rhs)
    }

    /// Both predicates must hold.
    #[must_use]
    pub fn and(self, rhs: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    /// At least one predicate must hold.
    #[must_use]
    pub fn or(self, rhs: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Literal(Value::Bool(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Literal(Value::Int(value))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Literal(Value::Float(value))
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        Self::Literal(value.into())
    }
}

impl<R: Into<Expr>> ops::Add<R> for Expr {
    type Output = Expr;

    fn add(self, rhs: R) -> Expr {
        Expr::Arith {
            op: ArithOp::Add,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Expr>> ops::Sub<R> for Expr {
    type Output = Expr;

    fn sub(self, rhs: R) -> Expr {
        Expr::Arith {
            op: ArithOp::Sub,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Expr>> ops::Mul<R> for Expr {
    type Output = Expr;

    fn mul(self, rhs: R) -> Expr {
        Expr::Arith {
            op: ArithOp::Mul,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Expr>> ops::Div<R> for Expr {
    type Output = Expr;

    fn div(self, rhs: R) -> Expr {
        Expr::Arith {
            op: ArithOp::Div,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }
}

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

/// Translation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TranslateError {
    /// A column reference failed identifier validation.
    Identifier(ValidationError),
    /// The expression uses a shape the translator does not render.
    Unsupported {
        /// What was found, and where.
        node: &'static str,
    },
    /// Integer constant folding overflowed.
    Overflow,
    /// Integer constant folding divided by zero.
    DivisionByZero,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(err) => write!(f, "invalid column in predicate: {err}"),
            Self::Unsupported { node } => {
                write!(f, "unsupported expression: {node}")
            },
            Self::Overflow => write!(f, "integer overflow while folding a constant expression"),
            Self::DivisionByZero => {
                write!(f, "division by zero while folding a constant expression")
            },
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Identifier(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TranslateError {
    fn from(err: ValidationError) -> Self {
        Self::Identifier(err)
    }
}
