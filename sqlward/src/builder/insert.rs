//! INSERT statement builder.

use tracing::debug;

use crate::types::{Parameter, ParameterizedQuery, Value, param_name};
use crate::validate::{IdentifierKind, validate_identifier};

use super::{BuildError, join_columns, validate_columns};

/// Build an INSERT statement binding each value to a generated placeholder.
///
/// Column `i` is paired with `@param{i}`, so `fields` and `values` must have
/// the same length. Values never appear in the statement text.
///
/// # Examples
///
/// ```
/// use sqlward::build_insert;
///
/// let q = build_insert(
///     &["name", "age"],
///     "users",
///     &["John".into(), 30i64.into()],
/// )?;
/// assert_eq!(q.text, "INSERT INTO users(name,age) VALUES(@param0,@param1)");
/// assert_eq!(q.params[0].name, "@param0");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub fn build_insert(
    fields: &[&str],
    table: &str,
    values: &[Value],
) -> Result<ParameterizedQuery, BuildError> {
    validate_identifier(table, IdentifierKind::Table)?;
    validate_columns(fields, "INSERT")?;
    if fields.len() != values.len() {
        return Err(BuildError::ColumnValueMismatch {
            columns: fields.len(),
            values: values.len(),
        });
    }

    let placeholders: Vec<String> = (0..fields.len()).map(param_name).collect();
    let text = format!(
        "INSERT INTO {table}({}) VALUES({})",
        join_columns(fields),
        placeholders.join(",")
    );

    let params: Vec<Parameter> = placeholders
        .into_iter()
        .zip(values.iter().cloned())
        .map(|(name, value)| Parameter::new(name, value))
        .collect();

    let query = ParameterizedQuery::new(text, params)?;
    debug!(table, params = query.params.len(), "built INSERT");
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_two_columns() {
        let q = build_insert(&["name", "age"], "users", &["John".into(), 30i64.into()]).unwrap();
        assert_eq!(q.text, "INSERT INTO users(name,age) VALUES(@param0,@param1)");
        assert_eq!(
            q.params,
            vec![
                Parameter::new("@param0", "John"),
                Parameter::new("@param1", 30i64),
            ]
        );
    }

    #[test]
    fn insert_single_column() {
        let q = build_insert(&["name"], "users", &["John".into()]).unwrap();
        assert_eq!(q.text, "INSERT INTO users(name) VALUES(@param0)");
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert_eq!(
            build_insert(&["name", "age"], "users", &["John".into()]),
            Err(BuildError::ColumnValueMismatch {
                columns: 2,
                values: 1,
            })
        );
    }

    #[test]
    fn empty_columns_are_rejected() {
        assert_eq!(
            build_insert(&[], "users", &[]),
            Err(BuildError::EmptyColumns {
                statement: "INSERT"
            })
        );
    }

    #[test]
    fn null_values_bind_as_parameters() {
        let q = build_insert(&["note"], "audit", &[Value::Null]).unwrap();
        assert_eq!(q.text, "INSERT INTO audit(note) VALUES(@param0)");
        assert_eq!(q.params[0].value, Value::Null);
    }

    #[test]
    fn hostile_value_stays_out_of_text() {
        let payload = "'); DROP TABLE users--";
        let q = build_insert(&["name"], "users", &[payload.into()]).unwrap();
        assert!(!q.text.contains(payload));
        assert_eq!(q.params[0].value, Value::String(payload.to_string()));
    }

    #[test]
    fn hostile_column_is_rejected() {
        assert!(build_insert(&["name; --"], "users", &["x".into()]).is_err());
    }
}
