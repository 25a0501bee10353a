//! DELETE statement builder.

use tracing::{debug, warn};

use crate::predicate::{Expr, translate};
use crate::types::{Parameter, ParameterizedQuery};
use crate::validate::{IdentifierKind, ValidationError, validate_condition, validate_identifier};

use super::BuildError;

/// Build a DELETE statement.
///
/// A blank condition is refused outright: a DELETE without a WHERE clause
/// wipes the table, and a caller who truly wants that can say so with an
/// explicit always-true parameterized condition. There is no unconditioned
/// variant.
///
/// # Examples
///
/// ```
/// use sqlward::{Parameter, build_delete};
///
/// let q = build_delete(
///     "users",
///     "id = @whereParam0",
///     &[Parameter::new("@whereParam0", 7i64)],
/// )?;
/// assert_eq!(q.text, "DELETE FROM users WHERE id = @whereParam0");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub fn build_delete(
    table: &str,
    condition: &str,
    where_params: &[Parameter],
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    if condition.trim().is_empty() {
        warn!(table, "refused DELETE without a condition");
        return Err(ValidationError::MissingDeleteCondition.into());
    }
    validate_condition(condition, !where_params.is_empty())?;

    let text = format!("DELETE FROM {table} WHERE {}", condition.trim());

    let query = ParameterizedQuery::new(text, where_params.to_vec())?;
    debug!(table, params = query.params.len(), "built DELETE");
    Ok(query)
}

/// Build a DELETE statement filtered by a typed predicate.
///
/// A predicate always yields a condition, so the blank-condition refusal
/// in [`build_delete`] cannot trigger here.
pub fn build_delete_where(table: &str, predicate: &Expr) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;

    let clause = translate(predicate)?;
    let text = format!("DELETE FROM {table} WHERE {}", clause.condition);

    let query = ParameterizedQuery::new(text, clause.params)?;
    debug!(table, params = query.params.len(), "built DELETE");
    Ok(query)
}
