//! Core types shared by the validators, builders, and predicate translator.

use serde::{Deserialize, Serialize};

use crate::builder::BuildError;

/// SQL parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL marker, bound as an explicit null (never the text `NULL`).
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Text.
    String(String),
}

impl Value {
    /// Whether this value is the SQL NULL marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A named parameter binding: placeholder name (including the `@` prefix)
/// plus the value the executor binds to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Placeholder name as it appears in the SQL text, e.g. `@param0`.
    pub name: String,
    /// Bound value.
    pub value: Value,
}

impl Parameter {
    /// Create a named parameter binding.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// SQL text plus its ordered, uniquely-named parameter bindings.
///
/// Construction goes through [`ParameterizedQuery::new`], which enforces the
/// binding invariants; a value of this type is safe to hand to an executor
/// that binds strictly by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "a built query does nothing until handed to an executor"]
pub struct ParameterizedQuery {
    /// The generated SQL text with `@name` placeholders.
    pub text: String,
    /// Parameter bindings in left-to-right placeholder order.
    pub params: Vec<Parameter>,
}

impl ParameterizedQuery {
    /// Assemble a query from text and bindings, checking the binding
    /// invariants: parameter names must be unique, and every `@name`
    /// placeholder referenced in the text (outside single-quoted runs)
    /// must have a binding.
    ///
    /// Unreferenced bindings are permitted; executors ignore extras.
    pub fn new(text: impl Into<String>, params: Vec<Parameter>) -> Result<Self, BuildError> {
        let text = text.into();

        for (i, p) in params.iter().enumerate() {
            if params.iter().take(i).any(|q| q.name == p.name) {
                return Err(BuildError::DuplicateParameter {
                    name: p.name.clone(),
                });
            }
        }

        for name in referenced_placeholders(&text) {
            if !params.iter().any(|p| p.name == name) {
                return Err(BuildError::UnboundPlaceholder { name });
            }
        }

        Ok(Self { text, params })
    }

    /// Look up a binding by placeholder name (including the `@` prefix).
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

/// Placeholder name for the N-th builder- or translator-allocated value.
pub(crate) fn param_name(idx: usize) -> String {
    format!("@param{idx}")
}

/// Placeholder name for the N-th UPDATE SET value. The prefix is distinct
/// from `@param`/`@whereParam` so SET bindings never collide with
/// caller-supplied WHERE bindings.
pub(crate) fn set_param_name(idx: usize) -> String {
    format!("@setParam{idx}")
}

/// Collect `@name` placeholders referenced in SQL text, in order of first
/// appearance. Content inside single-quoted runs is skipped so a literal
/// like `'%@example.com'` is not mistaken for a placeholder.
pub(crate) fn referenced_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' => in_string = !in_string,
            '@' if !in_string => {
                let mut name = String::from('@');
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // A bare `@` with no identifier after it is not a placeholder.
                if name.len() > 1 && !found.contains(&name) {
                    found.push(name);
                }
            },
            _ => {},
        }
    }

    found
}
