//! Statement helpers for types that map onto a single table.

use crate::builder::{
    BuildError, build_delete_where, build_insert, build_select, build_select_where,
    build_update_where,
};
use crate::predicate::Expr;
use crate::types::{ParameterizedQuery, Value};

/// One column of a record: name, current value, and a database type hint.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    /// Column name.
    pub column: &'static str,
    /// Current value.
    pub value: Value,
    /// Database type hint for executor integrations. Statement building
    /// binds [`Value`]s and never reads this.
    pub type_name: &'static str,
}

impl ColumnValue {
    /// Create a column entry.
    #[must_use]
    pub fn new(column: &'static str, value: impl Into<Value>, type_name: &'static str) -> Self {
        Self {
            column,
            value: value.into(),
            type_name,
        }
    }
}

/// A type stored in a single table, one field per column.
///
/// `columns()` must list the same names as `column_names()`, in the same
/// order. Date and time fields are rendered by the implementor as
/// `yyyy-MM-dd HH:mm:ss` text; the statement helpers treat them as opaque
/// strings.
///
/// # Examples
///
/// ```
/// use sqlward::{ColumnValue, Record, insert_record};
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for User {
///     fn table() -> &'static str {
///         "users"
///     }
///
///     fn column_names() -> &'static [&'static str] {
///         &["id", "name"]
///     }
///
///     fn columns(&self) -> Vec<ColumnValue> {
///         vec![
///             ColumnValue::new("id", self.id, "bigint"),
///             ColumnValue::new("name", self.name.clone(), "text"),
///         ]
///     }
/// }
///
/// let user = User { id: 0, name: "John".to_string() };
/// let q = insert_record(&user, true)?;
/// assert_eq!(q.text, "INSERT INTO users(name) VALUES(@param0)");
/// # Ok::<(), sqlward::BuildError>(())
/// ```
pub trait Record {
    /// Table backing this type.
    fn table() -> &'static str;

    /// Primary-key column name.
    fn primary_key() -> &'static str {
        "id"
    }

    /// Column names in declaration order.
    fn column_names() -> &'static [&'static str];

    /// Current column values, in [`column_names`](Record::column_names)
    /// order.
    fn columns(&self) -> Vec<ColumnValue>;
}

/// Build an INSERT for a record.
///
/// With `auto_increment` set, the primary-key column is omitted so the
/// database assigns it.
pub fn insert_record<R: Record>(
    record: &R,
    auto_increment: bool,
) -> Result<ParameterizedQuery, BuildError> {
    let (fields, values) = bound_columns(record, auto_increment);
    build_insert(&fields, R::table(), &values)
}

/// Build an UPDATE for a record, filtered by a typed predicate.
///
/// With `auto_increment` set, the primary-key column is left out of the
/// SET clause; a database-assigned key never changes.
pub fn update_record<R: Record>(
    record: &R,
    auto_increment: bool,
    predicate: &Expr,
) -> Result<ParameterizedQuery, BuildError> {
    let (fields, values) = bound_columns(record, auto_increment);
    build_update_where(&fields, R::table(), &values, predicate)
}

/// Build a SELECT of every column of `R`, filtered by a typed predicate.
pub fn select_records<R: Record>(predicate: &Expr) -> Result<ParameterizedQuery, BuildError> {
    build_select_where(R::column_names(), R::table(), predicate)
}

/// Build a SELECT of every column and every row of `R`.
///
/// The column list is always spelled out; no form of this helper emits
/// `*`.
pub fn select_all<R: Record>() -> Result<ParameterizedQuery, BuildError> {
    build_select(R::column_names(), R::table(), "", &[])
}

/// Build a DELETE of the rows of `R` matching a typed predicate.
pub fn delete_records<R: Record>(predicate: &Expr) -> Result<ParameterizedQuery, BuildError> {
    build_delete_where(R::table(), predicate)
}

fn bound_columns<R: Record>(record: &R, skip_primary_key: bool) -> (Vec<&'static str>, Vec<Value>) {
    record
        .columns()
        .into_iter()
        .filter(|cv| !(skip_primary_key && cv.column == R::primary_key()))
        .map(|cv| (cv.column, cv.value))
        .unzip()
}
