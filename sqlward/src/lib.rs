// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
// Pedantic lints that are too verbose to fix individually in a DSL-heavy crate
#![allow(clippy::doc_markdown)] // SQL keywords and code items in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::must_use_candidate)] // Fluent API doesn't need must_use everywhere
#![allow(clippy::cast_precision_loss)] // i64 to f64 promotion in constant folding

//! # sqlward - Injection-Safe SQL Statement Assembly
//!
//! Builders for CRUD statements that keep untrusted input out of statement
//! text. Identifiers are validated against an allowlist, raw condition
//! fragments are screened for injection shapes, and every value travels as
//! a named parameter (`@param0`, `@setParam0`, ...) beside the text, never
//! inside it.
//!
//! ## Quick Start
//!
//! ```
//! use sqlward::build_insert;
//!
//! let q = build_insert(
//!     &["name", "age"],
//!     "users",
//!     &["John".into(), 30i64.into()],
//! )?;
//!
//! assert_eq!(q.text, "INSERT INTO users(name,age) VALUES(@param0,@param1)");
//! assert_eq!(q.params[0].name, "@param0");
//! # Ok::<(), sqlward::BuildError>(())
//! ```
//!
//! ## Typed Predicates
//!
//! WHERE clauses can be written as expression trees instead of string
//! fragments. [`translate`] renders the tree with every literal bound:
//!
//! ```
//! use sqlward::{build_select_where, col};
//!
//! let q = build_select_where(
//!     &["name", "age"],
//!     "users",
//!     &col("age").gt(18i64).and(col("name").eq("John")),
//! )?;
//!
//! assert_eq!(
//!     q.text,
//!     "SELECT name,age FROM users WHERE (age > @param0) AND (name = @param1)",
//! );
//! # Ok::<(), sqlward::BuildError>(())
//! ```
//!
//! Or as a closure, with the [`pred!`] macro doing the tree-building:
//!
//! ```
//! use sqlward::{pred, translate};
//!
//! let min_age = 18i64;
//! let clause = translate(&pred!(|u| u.age > min_age && u.name == "John"))?;
//! assert_eq!(clause.condition, "(age > @param0) AND (name = @param1)");
//! # Ok::<(), sqlward::TranslateError>(())
//! ```
//!
//! ## Predicate Operators
//!
//! | Closure form | SQL | Notes |
//! |--------------|-----|-------|
//! | `==` / `.eq` | `=` | |
//! | `!=` / `.ne` | `!=` | |
//! | `>` `>=` `<` `<=` | `>` `>=` `<` `<=` | |
//! | `&&` / `.and` | `AND` | both sides parenthesized |
//! | `\|\|` / `.or` | `OR` | both sides parenthesized |
//! | `!` | `NOT` | |
//! | `+` `-` `*` `/` | folded | closed sub-expressions only |
//!
//! ## What Gets Refused
//!
//! ```
//! use sqlward::{IdentifierKind, build_delete, validate_identifier};
//!
//! assert!(validate_identifier("users; DROP TABLE users--", IdentifierKind::Table).is_err());
//! assert!(build_delete("users", "", &[]).is_err()); // DELETE needs a condition
//! ```

mod builder;
mod predicate;
mod record;
mod types;
mod validate;

pub use builder::{
    BuildError, build_delete, build_delete_where, build_insert, build_select, build_select_where,
    build_update, build_update_where,
};
pub use predicate::{ArithOp, CmpOp, Expr, TranslateError, WhereClause, col, lit, translate};
pub use record::{
    ColumnValue, Record, delete_records, insert_record, select_all, select_records, update_record,
};
pub use types::{Parameter, ParameterizedQuery, Value};
pub use validate::{
    IdentifierKind, ValidationError, is_valid_condition, is_valid_identifier, validate_condition,
    validate_identifier,
};

// Re-export the predicate macro from sqlward-macros
pub use sqlward_macros::pred;

/// Prelude module for convenient imports.
///
/// ```
/// use sqlward::prelude::*;
///
/// let q = build_select(&["id"], "users", "", &[]).unwrap();
/// assert_eq!(q.text, "SELECT id FROM users");
/// ```
pub mod prelude {
    pub use crate::{
        ArithOp, BuildError, CmpOp, ColumnValue, Expr, IdentifierKind, Parameter,
        ParameterizedQuery, Record, TranslateError, ValidationError, Value, WhereClause,
        build_delete, build_delete_where, build_insert, build_select, build_select_where,
        build_update, build_update_where, col, delete_records, insert_record, is_valid_condition,
        is_valid_identifier, lit, select_all, select_records, translate, update_record,
        validate_condition, validate_identifier,
    };

    // Re-export macros
    pub use sqlward_macros::pred;
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
