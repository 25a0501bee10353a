//! SELECT statement builder.

use tracing::debug;

use crate::predicate::{Expr, translate};
use crate::types::{Parameter, ParameterizedQuery};
use crate::validate::{IdentifierKind, validate_condition, validate_identifier};

use super::{BuildError, join_columns, validate_columns};

/// Build a SELECT statement from an explicit column list, a table name, and
/// a raw condition fragment.
///
/// `where_params` are the bindings for any placeholders the condition
/// references; they pass through to the result in caller order. The
/// condition is validated with `parameters_present` set from whether any
/// bindings were supplied. An empty condition means "no filter" and emits
/// no WHERE clause.
///
/// # Examples
///
/// ```
/// use sqlward::{Parameter, build_select};
///
/// let q = build_select(
///     &["name", "age"],
///     "users",
///     "id = @whereParam0",
///     &[Parameter::new("@whereParam0", 7i64)],
/// )?;
/// assert_eq!(q.text, "SELECT name,age FROM users WHERE id = @whereParam0");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub fn build_select(
    fields: &[&str],
    table: &str,
    condition: &str,
    where_params: &[Parameter],
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    validate_columns(fields, "SELECT")?;
    validate_condition(condition, !where_params.is_empty())?;

    let mut text = format!("SELECT {} FROM {table}", join_columns(fields));
    let condition = condition.trim();
    if !condition.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(condition);
    }

    let query = ParameterizedQuery::new(text, where_params.to_vec())?;
    debug!(table, params = query.params.len(), "built SELECT");
    Ok(query)
}

/// Build a SELECT statement filtered by a typed predicate.
///
/// The predicate is translated into a fully parameterized condition, so the
/// raw-fragment heuristics are skipped; identifier validation still applies
/// to the table, the columns, and every field the predicate references.
///
/// # Examples
///
/// ```
/// use sqlward::{build_select_where, col};
///
/// let q = build_select_where(&["name"], "users", &col("age").ge(21))?;
/// assert_eq!(q.text, "SELECT name FROM users WHERE age >= @param0");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub fn build_select_where(
    fields: &[&str],
    table: &str,
    predicate: &Expr,
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    validate_columns(fields, "SELECT")?;

    let clause = translate(predicate)?;
    let text = format!(
        "SELECT {} FROM {table} WHERE {}",
        join_columns(fields),
        clause.condition
    );

    let query = ParameterizedQuery::new(text, clause.params)?;
    debug!(table, params = query.params.len(), "built SELECT");
    Ok(query)
}
