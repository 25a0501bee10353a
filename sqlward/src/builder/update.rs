//! UPDATE statement builder.

use tracing::debug;

use crate::predicate::{Expr, translate};
use crate::types::{Parameter, ParameterizedQuery, Value, set_param_name};
use crate::validate::{IdentifierKind, validate_condition, validate_identifier};

use super::{BuildError, validate_columns};

/// Build an UPDATE statement binding each new value to a `@setParam{i}`
/// placeholder.
///
/// Column `i` is paired with `@setParam{i}`; the condition's own bindings
/// use a caller-chosen namespace (conventionally `@whereParam{i}`) so the
/// two sets cannot collide. In the result, condition bindings come first
/// and set bindings follow, in column order.
///
/// An empty condition updates every row; unlike DELETE this is permitted,
/// since full-table updates are a routine operation.
///
/// # Examples
///
/// ```
/// use sqlward::{Parameter, build_update};
///
/// let q = build_update(
///     &["name"],
///     "users",
///     &["John".into()],
///     "id = @whereParam0",
///     &[Parameter::new("@whereParam0", 7i64)],
/// )?;
/// assert_eq!(q.text, "UPDATE users SET name=@setParam0 WHERE id = @whereParam0");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub fn build_update(
    fields: &[&str],
    table: &str,
    values: &[Value],
    condition: &str,
    where_params: &[Parameter],
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    validate_columns(fields, "UPDATE")?;
    if fields.len() != values.len() {
        return Err(BuildError::ColumnValueMismatch {
            columns: fields.len(),
            values: values.len(),
        });
    }
    validate_condition(condition, !where_params.is_empty())?;

    let assignments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| format!("{}={}", field.trim(), set_param_name(idx)))
        .collect();

    let mut text = format!("UPDATE {table} SET {}", assignments.join(","));
    let condition = condition.trim();
    if !condition.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(condition);
    }

    let mut params = where_params.to_vec();
    params.extend(
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| Parameter::new(set_param_name(idx), value.clone())),
    );

    let query = ParameterizedQuery::new(text, params)?;
    debug!(table, params = query.params.len(), "built UPDATE");
    Ok(query)
}

/// Build an UPDATE statement filtered by a typed predicate.
///
/// The predicate's bindings use the `@param{i}` namespace and the set
/// clause uses `@setParam{i}`, so the merged parameter list never
/// collides. Predicate bindings come first, matching [`build_update`].
pub fn build_update_where(
    fields: &[&str],
    table: &str,
    values: &[Value],
    predicate: &Expr,
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    validate_columns(fields, "UPDATE")?;
    if fields.len() != values.len() {
        return Err(BuildError::ColumnValueMismatch {
            columns: fields.len(),
            values: values.len(),
        });
    }

    let clause = translate(predicate)?;

    let assignments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| format!("{}={}", field.trim(), set_param_name(idx)))
        .collect();

    let text = format!(
        "UPDATE {table} SET {} WHERE {}",
        assignments.join(","),
        clause.condition
    );

    let mut params = clause.params;
    params.extend(
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| Parameter::new(set_param_name(idx), value.clone())),
    );

    let query = ParameterizedQuery::new(text, params)?;
    debug!(table, params = query.params.len(), "built UPDATE");
    Ok(query)
}
