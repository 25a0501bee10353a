//! Proc-macros for sqlward - closure syntax for typed SQL predicates.

use proc_macro::TokenStream;

mod predicate;

/// Build a predicate expression tree from a one-parameter closure.
///
/// Field accesses on the closure parameter become column references;
/// comparisons and logical operators become the matching tree nodes; any
/// other sub-expression is evaluated where the macro is used and bound as
/// a literal.
///
/// # Example
/// ```ignore
/// let min_age = 18i64;
/// let expr = pred!(|u| u.age > min_age && u.name == "John");
/// let clause = translate(&expr)?;
/// // (age > @param0) AND (name = @param1)
/// ```
#[proc_macro]
pub fn pred(input: TokenStream) -> TokenStream {
    predicate::pred_impl(input)
}
