//! Property-based tests for the validators, builders, and translator.
//!
//! These tests generate random inputs to find edge cases in the injection
//! screens and to pin the invariants of built statements.

use proptest::prelude::*;
use sqlward::{
    Expr, IdentifierKind, build_insert, col, translate, validate_condition, validate_identifier,
};

// =============================================================================
// Validator Robustness
// =============================================================================

proptest! {
    /// Identifier validation never panics and gives the same answer twice
    #[test]
    fn identifier_validation_is_deterministic(name in ".{0,80}") {
        for kind in [IdentifierKind::Table, IdentifierKind::Field, IdentifierKind::FieldList] {
            let first = validate_identifier(&name, kind);
            let second = validate_identifier(&name, kind);
            prop_assert_eq!(first, second);
        }
    }

    /// Condition screening never panics and gives the same answer twice
    #[test]
    fn condition_screening_is_deterministic(
        fragment in ".{0,120}",
        parameters_present in any::<bool>()
    ) {
        let first = validate_condition(&fragment, parameters_present);
        let second = validate_condition(&fragment, parameters_present);
        prop_assert_eq!(first, second);
    }

    /// Accepted fields only ever contain the allowlisted characters
    #[test]
    fn accepted_fields_match_the_allowlist(name in ".{1,80}") {
        if validate_identifier(&name, IdentifierKind::Field).is_ok() {
            let token = name.trim();
            prop_assert!(!token.is_empty());
            for ch in token.chars() {
                prop_assert!(
                    ch.is_ascii_alphanumeric() || ch == '_' || ch == '"' || ch == '.',
                    "accepted field {:?} contains {:?}", name, ch
                );
            }
        }
    }
}

// =============================================================================
// Tautology Screening
// =============================================================================

/// Random casing for a SQL word, e.g. "or" -> "oR".
fn cased(word: &str) -> impl Strategy<Value = String> {
    let flips = proptest::collection::vec(any::<bool>(), word.len());
    let word = word.to_string();
    flips.prop_map(move |flips| {
        word.chars()
            .zip(flips)
            .map(|(c, up)| {
                if up {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

proptest! {
    /// `OR 1=1` survives no amount of casing or spacing games
    #[test]
    fn or_tautologies_are_rejected_in_any_spelling(
        or_word in cased("or"),
        true_word in cased("true"),
        ws1 in "[ \t]{1,3}",
        ws2 in "[ \t]{0,3}",
        variant in 0usize..3
    ) {
        let tail = match variant {
            0 => format!("1{ws2}={ws2}1"),
            1 => true_word,
            _ => format!("'1'{ws2}={ws2}'1'"),
        };
        let fragment = format!("id = @whereParam0{ws1}{or_word}{ws1}{tail}");
        prop_assert!(
            validate_condition(&fragment, true).is_err(),
            "accepted {:?}", fragment
        );
    }

    /// Comparisons against plain words stay legal despite the OR keyword
    #[test]
    fn or_followed_by_a_column_is_not_a_tautology(column in "c_[a-z0-9]{1,8}") {
        let fragment = format!("id = @a OR {column} = @b");
        prop_assert!(validate_condition(&fragment, true).is_ok(), "rejected {:?}", fragment);
    }
}

// =============================================================================
// Builder Invariants
// =============================================================================

proptest! {
    /// INSERT binds one uniquely named parameter per column, in order
    #[test]
    fn insert_binds_one_parameter_per_column(
        rows in proptest::collection::vec(("c_[a-z0-9]{1,8}", any::<i64>()), 1..6)
    ) {
        let columns: Vec<String> = rows.iter().map(|(c, _)| c.clone()).collect();
        let fields: Vec<&str> = columns.iter().map(String::as_str).collect();
        let bound: Vec<sqlward::Value> = rows.iter().map(|(_, v)| (*v).into()).collect();

        let q = build_insert(&fields, "t", &bound).unwrap();
        prop_assert_eq!(q.params.len(), columns.len());
        for (idx, param) in q.params.iter().enumerate() {
            prop_assert_eq!(param.name.clone(), format!("@param{idx}"));
        }
    }
}

// =============================================================================
// Translator Invariants
// =============================================================================

fn arb_predicate() -> impl Strategy<Value = Expr> {
    let leaf = ("c_[a-z0-9]{1,8}", any::<i64>()).prop_map(|(name, value)| col(name).gt(value));
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
            inner.prop_map(|a| !a),
        ]
    })
}

proptest! {
    /// Translation is deterministic and numbers parameters sequentially
    #[test]
    fn translation_is_deterministic(expr in arb_predicate()) {
        let first = translate(&expr).unwrap();
        let second = translate(&expr).unwrap();
        prop_assert_eq!(&first, &second);

        for (idx, param) in first.params.iter().enumerate() {
            prop_assert_eq!(param.name.clone(), format!("@param{idx}"));
        }
    }

    /// Every placeholder in the condition text has exactly one binding
    #[test]
    fn translated_conditions_are_fully_bound(expr in arb_predicate()) {
        let clause = translate(&expr).unwrap();
        for param in &clause.params {
            prop_assert!(
                clause.condition.contains(&param.name),
                "binding {:?} missing from {:?}", param.name, clause.condition
            );
        }
        let names: Vec<&str> = clause.params.iter().map(|p| p.name.as_str()).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), names.len(), "duplicate parameter names");
    }
}
