//! Validation layer for SQL identifiers and raw WHERE-clause fragments.
//!
//! Everything that reaches generated SQL text passes through here first:
//! - table and column names are checked against a restricted character set
//!   and a keyword blacklist ([`validate_identifier`])
//! - raw condition fragments are checked for tautology/comment injection
//!   patterns and for placeholder usage ([`validate_condition`])
//!
//! Validation is pure: no I/O, no state, same answer for the same input on
//! every call.

use std::fmt;

mod condition;
mod identifier;

pub use condition::{is_valid_condition, validate_condition};
pub use identifier::{IdentifierKind, is_valid_identifier, validate_identifier};

/// Validation failures for identifiers and condition fragments.
///
/// Identifier variants carry the offending name, its kind, and the violated
/// rule; condition variants name the pattern that triggered rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Identifier is empty or whitespace-only.
    Empty {
        /// The kind of identifier that was expected.
        kind: IdentifierKind,
    },
    /// Identifier exceeds the maximum byte length.
    TooLong {
        /// The offending identifier.
        name: String,
        /// The kind of identifier.
        kind: IdentifierKind,
        /// The maximum allowed byte length.
        max: usize,
    },
    /// Identifier contains a character outside its allowed set.
    ForbiddenCharacter {
        /// The offending identifier.
        name: String,
        /// The kind of identifier.
        kind: IdentifierKind,
        /// The first forbidden character encountered.
        ch: char,
    },
    /// Identifier contains a blacklisted statement keyword as a whole word.
    BlacklistedKeyword {
        /// The offending identifier.
        name: String,
        /// The kind of identifier.
        kind: IdentifierKind,
        /// The keyword that matched.
        keyword: &'static str,
    },
    /// Table name contains a period; schema qualification is unsupported.
    QualifiedTable {
        /// The offending table name.
        name: String,
    },
    /// Identifier contains embedded whitespace (aliases like `col AS alias`
    /// are rejected outright rather than parsed).
    EmbeddedWhitespace {
        /// The offending identifier.
        name: String,
        /// The kind of identifier.
        kind: IdentifierKind,
    },
    /// A comma-separated field list contains an empty entry.
    EmptyFieldEntry {
        /// The full field list as supplied.
        list: String,
    },
    /// Field uses the wildcard `*`; an explicit column list is required.
    Wildcard {
        /// The offending field token.
        name: String,
    },
    /// Condition contains a known tautology injection pattern.
    TautologyPattern {
        /// The canonical form of the matched pattern.
        pattern: &'static str,
    },
    /// Condition contains a quote immediately followed by `OR`/`AND`.
    QuotedConnective,
    /// Condition contains a SQL comment marker.
    CommentMarker {
        /// The marker that matched.
        marker: &'static str,
    },
    /// Condition contains the statement separator `;`.
    StatementSeparator,
    /// Condition compares values but has no `@` placeholder and no
    /// caller-supplied parameters.
    UnparameterizedComparison,
    /// DELETE was requested without a condition.
    MissingDeleteCondition,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => {
                write!(f, "empty {kind} identifier")
            },
            Self::TooLong { name, kind, max } => {
                write!(f, "{kind} identifier `{name}` exceeds {max} bytes")
            },
            Self::ForbiddenCharacter { name, kind, ch } => {
                write!(f, "{kind} identifier `{name}` contains forbidden character `{ch}`")
            },
            Self::BlacklistedKeyword {
                name,
                kind,
                keyword,
            } => {
                write!(f, "{kind} identifier `{name}` contains blacklisted keyword `{keyword}`")
            },
            Self::QualifiedTable { name } => {
                write!(f, "table identifier `{name}` is schema-qualified; qualified names are not supported")
            },
            Self::EmbeddedWhitespace { name, kind } => {
                write!(f, "{kind} identifier `{name}` contains embedded whitespace")
            },
            Self::EmptyFieldEntry { list } => {
                write!(f, "field list `{list}` contains an empty entry")
            },
            Self::Wildcard { name } => {
                write!(f, "field `{name}` uses the wildcard `*`; supply an explicit column list")
            },
            Self::TautologyPattern { pattern } => {
                write!(f, "condition contains injection pattern `{pattern}`")
            },
            Self::QuotedConnective => {
                write!(f, "condition contains a quote followed by OR/AND")
            },
            Self::CommentMarker { marker } => {
                write!(f, "condition contains comment marker `{marker}`")
            },
            Self::StatementSeparator => {
                write!(f, "condition contains statement separator `;`")
            },
            Self::UnparameterizedComparison => {
                write!(f, "condition contains a comparison with no placeholder and no bound parameters")
            },
            Self::MissingDeleteCondition => {
                write!(f, "DELETE requires a non-empty condition")
            },
        }
    }
}

impl std::error::Error for ValidationError {}
