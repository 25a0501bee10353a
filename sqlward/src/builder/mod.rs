//! Statement builders composing validated identifiers and conditions into
//! [`ParameterizedQuery`] values.
//!
//! Each builder is a pure function: all inputs arrive as arguments, the
//! result is a fresh query value, and the first validation failure aborts
//! the whole build. Nothing here holds "current query" state between calls,
//! so one caller can never observe another caller's half-built statement.
//!
//! [`ParameterizedQuery`]: crate::ParameterizedQuery

use std::fmt;

use crate::predicate::TranslateError;
use crate::validate::{IdentifierKind, ValidationError, validate_identifier};

mod delete;
mod insert;
mod select;
mod update;

pub use delete::{build_delete, build_delete_where};
pub use insert::build_insert;
pub use select::{build_select, build_select_where};
pub use update::{build_update, build_update_where};

/// Failures raised while composing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// An identifier or condition failed validation.
    Validation(ValidationError),
    /// A predicate could not be translated to a condition.
    Predicate(TranslateError),
    /// Column and value counts differ.
    ColumnValueMismatch {
        /// Number of columns supplied.
        columns: usize,
        /// Number of values supplied.
        values: usize,
    },
    /// The statement requires at least one column.
    EmptyColumns {
        /// The statement kind being built.
        statement: &'static str,
    },
    /// Two bindings share one placeholder name.
    DuplicateParameter {
        /// The duplicated placeholder name.
        name: String,
    },
    /// The SQL text references a placeholder with no binding.
    UnboundPlaceholder {
        /// The unbound placeholder name.
        name: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Predicate(err) => write!(f, "{err}"),
            Self::ColumnValueMismatch { columns, values } => {
                write!(f, "column/value count mismatch: {columns} columns, {values} values")
            },
            Self::EmptyColumns { statement } => {
                write!(f, "{statement} requires at least one column")
            },
            Self::DuplicateParameter { name } => {
                write!(f, "duplicate parameter name `{name}`")
            },
            Self::UnboundPlaceholder { name } => {
                write!(f, "placeholder `{name}` has no bound parameter")
            },
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Predicate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BuildError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<TranslateError> for BuildError {
    fn from(err: TranslateError) -> Self {
        Self::Predicate(err)
    }
}

/// Validate a column slice for a statement that needs at least one column.
fn validate_columns(fields: &[&str], statement: &'static str) -> Result<(), BuildError> {
    if fields.is_empty() {
        return Err(BuildError::EmptyColumns { statement });
    }
    for field in fields {
        validate_identifier(field, IdentifierKind::Field)?;
    }
    Ok(())
}

/// Join validated column tokens with `,`, trimming each the way the
/// validator did.
fn join_columns(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| f.trim())
        .collect::<Vec<_>>()
        .join(",")
}
