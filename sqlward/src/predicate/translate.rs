//! Rendering of predicate trees into parameterized conditions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Parameter, Value, param_name};
use crate::validate::{IdentifierKind, validate_identifier};

use super::{ArithOp, Expr, TranslateError};

/// A rendered WHERE clause: condition text plus its bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    /// Condition text, e.g. `(age > @param0) AND (name = @param1)`.
    pub condition: String,
    /// Bindings for every placeholder the condition references, in
    /// left-to-right order of first appearance.
    pub params: Vec<Parameter>,
}

/// Translate a predicate tree into a parameterized condition.
///
/// Column references are validated as field identifiers; literals become
/// `@param{i}` bindings numbered left to right, starting at zero on every
/// call. Logical connectives parenthesize both sides, so operator
/// precedence in the output never depends on the reader:
/// `(age > @param0) AND (name = @param1)`.
///
/// Arithmetic is folded before binding: `lit(2) + lit(3)` binds a single
/// parameter holding `5`. Folding only applies to closed sub-expressions;
/// arithmetic over a column is refused rather than rendered, as is a bare
/// column or literal in boolean position. A null literal binds as a
/// parameter like any other value, with SQL's three-valued comparison
/// semantics left to the database.
///
/// # Examples
///
/// ```
/// use sqlward::{Value, col, translate};
///
/// let clause = translate(&col("age").gt(18i64).and(col("name").eq("John")))?;
/// assert_eq!(clause.condition, "(age > @param0) AND (name = @param1)");
/// assert_eq!(clause.params[0].value, Value::Int(18));
/// # Ok::<(), sqlward::TranslateError>(())
/// ```
pub fn translate(expr: &Expr) -> Result<WhereClause, TranslateError> {
    let mut params = Vec::new();
    let condition = render_predicate(expr, &mut params)?;
    debug!(params = params.len(), "translated predicate");
    Ok(WhereClause { condition, params })
}

fn render_predicate(expr: &Expr, params: &mut Vec<Parameter>) -> Result<String, TranslateError> {
    match expr {
        Expr::Compare { op, lhs, rhs } => {
            let lhs = render_operand(lhs, params)?;
            let rhs = render_operand(rhs, params)?;
            Ok(format!("{lhs} {} {rhs}", op.symbol()))
        },
        Expr::And(lhs, rhs) => {
            let lhs = render_predicate(lhs, params)?;
            let rhs = render_predicate(rhs, params)?;
            Ok(format!("({lhs}) AND ({rhs})"))
        },
        Expr::Or(lhs, rhs) => {
            let lhs = render_predicate(lhs, params)?;
            let rhs = render_predicate(rhs, params)?;
            Ok(format!("({lhs}) OR ({rhs})"))
        },
        Expr::Not(inner) => {
            let inner = render_predicate(inner, params)?;
            Ok(format!("NOT ({inner})"))
        },
        Expr::Field(_) => Err(TranslateError::Unsupported {
            node: "bare column in boolean position",
        }),
        Expr::Literal(_) => Err(TranslateError::Unsupported {
            node: "bare literal in boolean position",
        }),
        Expr::Arith { .. } | Expr::Neg(_) => Err(TranslateError::Unsupported {
            node: "arithmetic in boolean position",
        }),
    }
}

fn render_operand(expr: &Expr, params: &mut Vec<Parameter>) -> Result<String, TranslateError> {
    match expr {
        Expr::Field(name) => {
            validate_identifier(name, IdentifierKind::Field)?;
            Ok(name.trim().to_string())
        },
        Expr::Literal(value) => Ok(bind(value.clone(), params)),
        Expr::Arith { .. } | Expr::Neg(_) => {
            let folded = fold(expr)?;
            Ok(bind(folded, params))
        },
        Expr::Compare { .. } => Err(TranslateError::Unsupported {
            node: "comparison in operand position",
        }),
        Expr::And(..) | Expr::Or(..) | Expr::Not(_) => Err(TranslateError::Unsupported {
            node: "logical connective in operand position",
        }),
    }
}

fn bind(value: Value, params: &mut Vec<Parameter>) -> String {
    let name = param_name(params.len());
    params.push(Parameter::new(name.clone(), value));
    name
}

fn fold(expr: &Expr) -> Result<Value, TranslateError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Neg(inner) => match fold(inner)? {
            Value::Int(v) => v
                .checked_neg()
                .map(Value::Int)
                .ok_or(TranslateError::Overflow),
            Value::Float(v) => Ok(Value::Float(-v)),
            _ => Err(TranslateError::Unsupported {
                node: "arithmetic over a non-numeric value",
            }),
        },
        Expr::Arith { op, lhs, rhs } => fold_binary(*op, fold(lhs)?, fold(rhs)?),
        Expr::Field(_) => Err(TranslateError::Unsupported {
            node: "arithmetic over a column",
        }),
        Expr::Compare { .. } | Expr::And(..) | Expr::Or(..) | Expr::Not(_) => {
            Err(TranslateError::Unsupported {
                node: "arithmetic over a non-literal expression",
            })
        },
    }
}

fn fold_binary(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value, TranslateError> {
    if let (Value::Int(l), Value::Int(r)) = (&lhs, &rhs) {
        let folded = match op {
            ArithOp::Add => l.checked_add(*r),
            ArithOp::Sub => l.checked_sub(*r),
            ArithOp::Mul => l.checked_mul(*r),
            ArithOp::Div => {
                if *r == 0 {
                    return Err(TranslateError::DivisionByZero);
                }
                // i64::MIN / -1 still overflows.
                l.checked_div(*r)
            },
        };
        return folded.map(Value::Int).ok_or(TranslateError::Overflow);
    }

    let (Some(l), Some(r)) = (as_float(&lhs), as_float(&rhs)) else {
        return Err(TranslateError::Unsupported {
            node: "arithmetic over a non-numeric value",
        });
    };
    let folded = match op {
        ArithOp::Add => l + r,
        ArithOp::Sub => l - r,
        ArithOp::Mul => l * r,
        ArithOp::Div => l / r,
    };
    Ok(Value::Float(folded))
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::Null | Value::Bool(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{col, lit};
    use crate::validate::ValidationError;

    #[test]
    fn comparison_binds_literal() {
        let clause = translate(&col("age").gt(18i64)).unwrap();
        assert_eq!(clause.condition, "age > @param0");
        assert_eq!(clause.params, vec![Parameter::new("@param0", 18i64)]);
    }

    #[test]
    fn conjunction_parenthesizes_both_sides() {
        let clause = translate(&col("age").gt(18i64).and(col("name").eq("John"))).unwrap();
        assert_eq!(clause.condition, "(age > @param0) AND (name = @param1)");
        assert_eq!(
            clause.params,
            vec![
                Parameter::new("@param0", 18i64),
                Parameter::new("@param1", "John"),
            ]
        );
    }

    #[test]
    fn parameters_number_left_to_right() {
        let clause = translate(
            &col("a")
                .eq(1i64)
                .or(col("b").eq(2i64))
                .and(col("c").eq(3i64)),
        )
        .unwrap();
        assert_eq!(
            clause.condition,
            "((a = @param0) OR (b = @param1)) AND (c = @param2)"
        );
        let names: Vec<&str> = clause.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["@param0", "@param1", "@param2"]);
    }

    #[test]
    fn not_wraps_its_predicate() {
        let clause = translate(&!col("active").eq(true)).unwrap();
        assert_eq!(clause.condition, "NOT (active = @param0)");
    }

    #[test]
    fn column_to_column_comparison_binds_nothing() {
        let clause = translate(&col("updated_at").gt(col("created_at"))).unwrap();
        assert_eq!(clause.condition, "updated_at > created_at");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn closed_arithmetic_folds_to_one_binding() {
        let clause = translate(&col("age").gt(lit(18i64) + lit(4i64))).unwrap();
        assert_eq!(clause.condition, "age > @param0");
        assert_eq!(clause.params, vec![Parameter::new("@param0", 22i64)]);
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        let clause = translate(&col("price").lt(lit(10i64) * lit(1.5f64))).unwrap();
        assert_eq!(clause.params[0].value, Value::Float(15.0));
    }

    #[test]
    fn negation_folds() {
        let clause = translate(&col("delta").eq(-lit(5i64))).unwrap();
        assert_eq!(clause.params[0].value, Value::Int(-5));
    }

    #[test]
    fn null_literal_binds_as_parameter() {
        let clause = translate(&col("deleted_at").eq(None::<i64>)).unwrap();
        assert_eq!(clause.condition, "deleted_at = @param0");
        assert_eq!(clause.params[0].value, Value::Null);
    }

    #[test]
    fn hostile_column_is_rejected() {
        let err = translate(&col("name; DROP TABLE users--").eq(1i64)).unwrap_err();
        assert!(matches!(err, TranslateError::Identifier(_)));
    }

    #[test]
    fn wildcard_column_is_rejected() {
        assert_eq!(
            translate(&col("*").eq(1i64)),
            Err(TranslateError::Identifier(ValidationError::Wildcard {
                name: "*".to_string(),
            }))
        );
    }

    #[test]
    fn bare_column_is_not_a_predicate() {
        assert_eq!(
            translate(&col("active")),
            Err(TranslateError::Unsupported {
                node: "bare column in boolean position",
            })
        );
    }

    #[test]
    fn arithmetic_over_a_column_is_refused() {
        let err = translate(&(col("age") + 1i64).gt(18i64)).unwrap_err();
        assert_eq!(
            err,
            TranslateError::Unsupported {
                node: "arithmetic over a column",
            }
        );
    }

    #[test]
    fn integer_overflow_is_reported() {
        let err = translate(&col("n").eq(lit(i64::MAX) + lit(1i64))).unwrap_err();
        assert_eq!(err, TranslateError::Overflow);
    }

    #[test]
    fn division_by_zero_is_reported() {
        let err = translate(&col("n").eq(lit(1i64) / lit(0i64))).unwrap_err();
        assert_eq!(err, TranslateError::DivisionByZero);
    }

    #[test]
    fn numbering_restarts_per_call() {
        let first = translate(&col("a").eq(1i64)).unwrap();
        let second = translate(&col("b").eq(2i64)).unwrap();
        assert_eq!(first.params[0].name, "@param0");
        assert_eq!(second.params[0].name, "@param0");
    }
}
