//! Heuristic validation of raw WHERE-clause fragments.

use super::ValidationError;
use super::identifier::contains_whole_word;

/// SQL comment markers rejected anywhere in a fragment.
const COMMENT_MARKERS: &[&str] = &["--", "/*", "*/"];

/// Validate a raw WHERE-clause fragment.
///
/// An empty fragment is valid ("no filter"). A non-empty fragment is
/// rejected when it contains comment markers, the statement separator `;`,
/// a known tautology pattern (`OR 1=1`, `OR '1'='1'`, `OR TRUE` in any
/// casing/spacing), or a quote immediately followed by `OR`/`AND`.
///
/// `parameters_present` tells the validator whether the caller is binding
/// parameters alongside this fragment.
///
/// # Heuristic, not a grammar
///
/// A fragment containing a comparison operator (`=`, `<`, `>`, `LIKE`,
/// `IN`) but no `@` placeholder is rejected when `parameters_present` is
/// false. This also rejects legitimate column-to-column comparisons such as
/// `a = b`; the trade-off is deliberate — at this layer an unparameterized
/// comparison is indistinguishable from an inlined literal. Build column
/// comparisons through the predicate API instead.
///
/// # Examples
///
/// ```
/// use sqlward::validate_condition;
///
/// assert!(validate_condition("", false).is_ok());
/// assert!(validate_condition("id = @whereParam0", false).is_ok());
/// assert!(validate_condition("1=1 OR 1=1", true).is_err());
/// assert!(validate_condition("age > 18", false).is_err());
/// ```
pub fn validate_condition(
    fragment: &str,
    parameters_present: bool,
) -> Result<(), ValidationError> {
    if fragment.trim().is_empty() {
        return Ok(());
    }

    for marker in COMMENT_MARKERS {
        if fragment.contains(marker) {
            return Err(ValidationError::CommentMarker { marker });
        }
    }

    if fragment.contains(';') {
        return Err(ValidationError::StatementSeparator);
    }

    let upper = fragment.to_ascii_uppercase();

    if let Some(pattern) = find_tautology(&upper) {
        return Err(ValidationError::TautologyPattern { pattern });
    }

    if quote_before_connective(&upper) {
        return Err(ValidationError::QuotedConnective);
    }

    if !parameters_present && !fragment.contains('@') && contains_comparison(&upper) {
        return Err(ValidationError::UnparameterizedComparison);
    }

    Ok(())
}

/// Boolean convenience form of [`validate_condition`].
#[must_use]
pub fn is_valid_condition(fragment: &str, parameters_present: bool) -> bool {
    validate_condition(fragment, parameters_present).is_ok()
}

/// Scan for tautology patterns anchored on a whole-word `OR`, tolerating
/// arbitrary whitespace between tokens.
fn find_tautology(upper: &str) -> Option<&'static str> {
    let bytes = upper.as_bytes();
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    for (pos, _) in upper.match_indices("OR") {
        let before = upper[..pos].chars().next_back();
        let after = upper[pos + 2..].chars().next();
        // Part of a longer word such as ORDER or PRIOR
        if before.is_some_and(is_word) || after.is_some_and(is_word) {
            continue;
        }

        let start = skip_ws(bytes, pos + 2);
        if let Some(pattern) = tautology_at(bytes, start) {
            return Some(pattern);
        }
    }

    None
}

/// Match `TRUE`, `1=1`, or `'1'='1'` starting at `start`.
fn tautology_at(bytes: &[u8], start: usize) -> Option<&'static str> {
    if word_at(bytes, start, b"TRUE") {
        return Some("OR TRUE");
    }

    if let Some(i) = literal_one(bytes, start) {
        let i = skip_ws(bytes, i);
        if let Some(i) = eat(bytes, i, b'=') {
            let i = skip_ws(bytes, i);
            if let Some(end) = literal_one(bytes, i) {
                // `1=10` is a comparison, not the tautology
                if !bytes.get(end).is_some_and(u8::is_ascii_alphanumeric) {
                    return Some("OR 1=1");
                }
            }
        }
    }

    if let Some(i) = quoted_one(bytes, start) {
        let i = skip_ws(bytes, i);
        if let Some(i) = eat(bytes, i, b'=') {
            let i = skip_ws(bytes, i);
            if quoted_one(bytes, i).is_some() {
                return Some("OR '1'='1'");
            }
        }
    }

    None
}

/// A single quote followed (modulo whitespace) by whole-word `OR` or `AND`.
fn quote_before_connective(upper: &str) -> bool {
    let bytes = upper.as_bytes();

    for (pos, _) in upper.match_indices('\'') {
        let i = skip_ws(bytes, pos + 1);
        if word_at(bytes, i, b"OR") || word_at(bytes, i, b"AND") {
            return true;
        }
    }

    false
}

fn contains_comparison(upper: &str) -> bool {
    if upper.contains('=') || upper.contains('<') || upper.contains('>') {
        return true;
    }
    contains_whole_word(upper, "LIKE") || contains_whole_word(upper, "IN")
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

fn eat(bytes: &[u8], i: usize, expected: u8) -> Option<usize> {
    (bytes.get(i) == Some(&expected)).then_some(i + 1)
}

/// The word must end at a non-word character or the end of input.
fn word_at(bytes: &[u8], i: usize, word: &[u8]) -> bool {
    bytes.get(i..i + word.len()) == Some(word)
        && !bytes
            .get(i + word.len())
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// The bare literal `1`, not the prefix of a longer number.
fn literal_one(bytes: &[u8], i: usize) -> Option<usize> {
    let i = eat(bytes, i, b'1')?;
    if bytes.get(i).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    Some(i)
}

fn quoted_one(bytes: &[u8], i: usize) -> Option<usize> {
    let i = eat(bytes, i, b'\'')?;
    let i = eat(bytes, i, b'1')?;
    eat(bytes, i, b'\'')
}
