//! SQL identifier validation to prevent injection through table and column names.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum byte length for a single identifier segment (PostgreSQL's
/// `NAMEDATALEN - 1`).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Statement keywords rejected anywhere in an identifier, matched as whole
/// words case-insensitively. Word boundaries are characters outside
/// `[A-Za-z0-9_]`, so `updated_at` is legal while `a.drop` is not.
const BLACKLISTED_KEYWORDS: &[&str] = &["DROP", "DELETE", "INSERT", "UPDATE", "UNION", "WITH"];

/// The kind of identifier under validation; each kind has its own allowed
/// character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// A bare table name: `{alnum, '_', '"'}`, no periods, no whitespace.
    Table,
    /// A single column reference: `{alnum, '_', '"', '.'}`.
    Field,
    /// A comma-separated column list; each token validated as a field.
    FieldList,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Field => write!(f, "field"),
            Self::FieldList => write!(f, "field list"),
        }
    }
}

/// Validate a table name, column name, or comma-separated column list.
///
/// An empty [`IdentifierKind::FieldList`] is accepted (it names no columns);
/// any other empty identifier is rejected. The wildcard `*` is never
/// accepted — callers supply explicit column lists.
///
/// # Examples
///
/// ```
/// use sqlward::{IdentifierKind, validate_identifier};
///
/// assert!(validate_identifier("users", IdentifierKind::Table).is_ok());
/// assert!(validate_identifier("name, age", IdentifierKind::FieldList).is_ok());
/// assert!(validate_identifier("users; DROP TABLE users--", IdentifierKind::Table).is_err());
/// assert!(validate_identifier("*", IdentifierKind::FieldList).is_err());
/// ```
pub fn validate_identifier(name: &str, kind: IdentifierKind) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        if kind == IdentifierKind::FieldList {
            return Ok(());
        }
        return Err(ValidationError::Empty { kind });
    }

    match kind {
        IdentifierKind::Table => validate_table(name),
        IdentifierKind::Field => validate_field_token(name.trim(), kind),
        IdentifierKind::FieldList => {
            for token in name.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    return Err(ValidationError::EmptyFieldEntry {
                        list: name.to_string(),
                    });
                }
                validate_field_token(token, kind)?;
            }
            Ok(())
        },
    }
}

/// Boolean convenience form of [`validate_identifier`].
#[must_use]
pub fn is_valid_identifier(name: &str, kind: IdentifierKind) -> bool {
    validate_identifier(name, kind).is_ok()
}

fn validate_table(name: &str) -> Result<(), ValidationError> {
    let kind = IdentifierKind::Table;

    for ch in name.chars() {
        if ch.is_whitespace() {
            return Err(ValidationError::EmbeddedWhitespace {
                name: name.to_string(),
                kind,
            });
        }
        if ch == '.' {
            return Err(ValidationError::QualifiedTable {
                name: name.to_string(),
            });
        }
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '"') {
            return Err(ValidationError::ForbiddenCharacter {
                name: name.to_string(),
                kind,
                ch,
            });
        }
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            kind,
            max: MAX_IDENTIFIER_LENGTH,
        });
    }

    check_keywords(name, kind)
}

/// Validate one trimmed field token: a bare or dot-qualified column
/// reference.
fn validate_field_token(token: &str, kind: IdentifierKind) -> Result<(), ValidationError> {
    if token.contains('*') {
        return Err(ValidationError::Wildcard {
            name: token.to_string(),
        });
    }

    for ch in token.chars() {
        if ch.is_whitespace() {
            return Err(ValidationError::EmbeddedWhitespace {
                name: token.to_string(),
                kind,
            });
        }
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '"' || ch == '.') {
            return Err(ValidationError::ForbiddenCharacter {
                name: token.to_string(),
                kind,
                ch,
            });
        }
    }

    // Length cap applies per dot-separated segment, matching how the
    // database itself limits names.
    for segment in token.split('.') {
        if segment.len() > MAX_IDENTIFIER_LENGTH {
            return Err(ValidationError::TooLong {
                name: token.to_string(),
                kind,
                max: MAX_IDENTIFIER_LENGTH,
            });
        }
    }

    check_keywords(token, kind)
}

fn check_keywords(name: &str, kind: IdentifierKind) -> Result<(), ValidationError> {
    let upper = name.to_ascii_uppercase();
    for keyword in BLACKLISTED_KEYWORDS {
        if contains_whole_word(&upper, keyword) {
            return Err(ValidationError::BlacklistedKeyword {
                name: name.to_string(),
                kind,
                keyword,
            });
        }
    }
    Ok(())
}

/// Whole-word containment check over an already-uppercased haystack.
pub(super) fn contains_whole_word(upper: &str, keyword: &str) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    for (pos, matched) in upper.match_indices(keyword) {
        let before = upper[..pos].chars().next_back();
        let after = upper[pos + matched.len()..].chars().next();
        if !before.is_some_and(is_word) && !after.is_some_and(is_word) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_table_names() {
        assert!(validate_identifier("users", IdentifierKind::Table).is_ok());
        assert!(validate_identifier("user_accounts", IdentifierKind::Table).is_ok());
        assert!(validate_identifier("t1", IdentifierKind::Table).is_ok());
        assert!(validate_identifier("\"Users\"", IdentifierKind::Table).is_ok());
        // Keywords as substrings are fine; only whole words are blocked
        assert!(validate_identifier("updated_rows", IdentifierKind::Table).is_ok());
        assert!(validate_identifier("deleted_at_log", IdentifierKind::Table).is_ok());
    }

    #[test]
    fn table_rejects_structure_characters() {
        let cases = ["users;", "users table", "a`b", "pay$roll", "it's", "a\\b", "a/b"];
        for name in cases {
            assert!(
                validate_identifier(name, IdentifierKind::Table).is_err(),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn table_rejects_schema_qualification() {
        assert_eq!(
            validate_identifier("public.users", IdentifierKind::Table),
            Err(ValidationError::QualifiedTable {
                name: "public.users".to_string()
            })
        );
    }

    #[test]
    fn table_rejects_whole_word_keywords() {
        assert_eq!(
            validate_identifier("drop", IdentifierKind::Table),
            Err(ValidationError::BlacklistedKeyword {
                name: "drop".to_string(),
                kind: IdentifierKind::Table,
                keyword: "DROP",
            })
        );
        assert!(validate_identifier("UNION", IdentifierKind::Table).is_err());
        assert!(validate_identifier("With", IdentifierKind::Table).is_err());
    }

    #[test]
    fn classic_injection_identifier_is_rejected() {
        let err = validate_identifier("users; DROP TABLE users--", IdentifierKind::Table);
        assert!(err.is_err());
    }

    #[test]
    fn empty_identifiers() {
        assert_eq!(
            validate_identifier("", IdentifierKind::Table),
            Err(ValidationError::Empty {
                kind: IdentifierKind::Table
            })
        );
        assert!(validate_identifier("   ", IdentifierKind::Field).is_err());
        // An empty field list names no columns; the builders decide whether
        // that is acceptable for the statement being built.
        assert!(validate_identifier("", IdentifierKind::FieldList).is_ok());
        assert!(validate_identifier("  ", IdentifierKind::FieldList).is_ok());
    }

    #[test]
    fn length_limits() {
        let ok = "a".repeat(63);
        let long = "a".repeat(64);
        assert!(validate_identifier(&ok, IdentifierKind::Table).is_ok());
        assert!(validate_identifier(&long, IdentifierKind::Table).is_err());
        // Per-segment cap for qualified fields
        let qualified_ok = format!("{ok}.{ok}");
        assert!(validate_identifier(&qualified_ok, IdentifierKind::Field).is_ok());
        let qualified_long = format!("{long}.col");
        assert!(validate_identifier(&qualified_long, IdentifierKind::Field).is_err());
    }

    #[test]
    fn valid_fields_and_lists() {
        assert!(validate_identifier("name", IdentifierKind::Field).is_ok());
        assert!(validate_identifier("users.name", IdentifierKind::Field).is_ok());
        assert!(validate_identifier("\"Name\"", IdentifierKind::Field).is_ok());
        assert!(validate_identifier("name,age,email", IdentifierKind::FieldList).is_ok());
        // Tokens are trimmed before validation
        assert!(validate_identifier("name , age", IdentifierKind::FieldList).is_ok());
        assert!(validate_identifier(" name", IdentifierKind::Field).is_ok());
    }

    #[test]
    fn field_list_rejects_empty_entries() {
        assert_eq!(
            validate_identifier("name,,age", IdentifierKind::FieldList),
            Err(ValidationError::EmptyFieldEntry {
                list: "name,,age".to_string()
            })
        );
        assert!(validate_identifier("name,", IdentifierKind::FieldList).is_err());
        assert!(validate_identifier(",name", IdentifierKind::FieldList).is_err());
    }

    #[test]
    fn field_rejects_internal_whitespace() {
        // No alias detection: anything with internal whitespace goes
        assert_eq!(
            validate_identifier("col AS alias", IdentifierKind::Field),
            Err(ValidationError::EmbeddedWhitespace {
                name: "col AS alias".to_string(),
                kind: IdentifierKind::Field,
            })
        );
        assert!(validate_identifier("a b,c", IdentifierKind::FieldList).is_err());
    }

    #[test]
    fn wildcard_is_never_accepted() {
        assert_eq!(
            validate_identifier("*", IdentifierKind::FieldList),
            Err(ValidationError::Wildcard {
                name: "*".to_string()
            })
        );
        assert!(validate_identifier("users.*", IdentifierKind::Field).is_err());
        assert!(validate_identifier("name,*", IdentifierKind::FieldList).is_err());
    }

    #[test]
    fn field_keyword_boundaries() {
        // Substring keywords are allowed
        assert!(validate_identifier("updated_at", IdentifierKind::Field).is_ok());
        assert!(validate_identifier("insertion_order", IdentifierKind::Field).is_ok());
        assert!(validate_identifier("with_tax", IdentifierKind::Field).is_ok());
        // Dot and quote act as word boundaries
        assert!(validate_identifier("a.drop", IdentifierKind::Field).is_err());
        assert!(validate_identifier("\"drop\"", IdentifierKind::Field).is_err());
        assert!(validate_identifier("name,delete", IdentifierKind::FieldList).is_err());
    }

    #[test]
    fn field_rejects_forbidden_characters() {
        for name in ["a;b", "a'b", "a`b", "a$b", "a\\b", "a/b", "a(b)", "a-b"] {
            assert!(
                validate_identifier(name, IdentifierKind::Field).is_err(),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn non_ascii_is_rejected() {
        assert!(validate_identifier("tablé", IdentifierKind::Table).is_err());
        assert!(validate_identifier("naïve", IdentifierKind::Field).is_err());
    }

    #[test]
    fn boolean_form_matches() {
        assert!(is_valid_identifier("users", IdentifierKind::Table));
        assert!(!is_valid_identifier("users;", IdentifierKind::Table));
    }

    #[test]
    fn validation_is_idempotent() {
        for name in ["users", "users; DROP TABLE users--", "", "name,age"] {
            for kind in [
                IdentifierKind::Table,
                IdentifierKind::Field,
                IdentifierKind::FieldList,
            ] {
                assert_eq!(
                    validate_identifier(name, kind),
                    validate_identifier(name, kind)
                );
            }
        }
    }
}
