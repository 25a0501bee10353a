//! pred! macro implementation - lowering a closure into expression-tree calls.

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, quote};
use syn::{
    BinOp, Expr, ExprClosure, Pat, Result, UnOp, ext::IdentExt, parse_macro_input,
    spanned::Spanned,
};

pub fn pred_impl(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);
    match lower_closure(&closure) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn lower_closure(closure: &ExprClosure) -> Result<TokenStream2> {
    let param = closure_param(closure)?;
    lower_predicate(&closure.body, &param)
}

// ============================================================================
// Closure parameter
// ============================================================================

fn closure_param(closure: &ExprClosure) -> Result<syn::Ident> {
    let mut inputs = closure.inputs.iter();
    let (Some(pat), None) = (inputs.next(), inputs.next()) else {
        return Err(syn::Error::new_spanned(
            closure,
            "Expected exactly one closure parameter.\n\
             Usage: pred!(|u| u.age > 18)",
        ));
    };
    param_ident(pat)
}

fn param_ident(pat: &Pat) -> Result<syn::Ident> {
    match pat {
        Pat::Ident(pat_ident) => Ok(pat_ident.ident.clone()),
        Pat::Type(pat_type) => param_ident(&pat_type.pat),
        other => Err(syn::Error::new(
            other.span(),
            "Expected a plain parameter name.\n\
             Usage: pred!(|u| u.age > 18)",
        )),
    }
}

// ============================================================================
// Boolean position: comparisons and logical connectives
// ============================================================================

fn lower_predicate(expr: &Expr, param: &syn::Ident) -> Result<TokenStream2> {
    match expr {
        Expr::Binary(binary) => match binary.op {
            BinOp::And(_) => {
                let lhs = lower_predicate(&binary.left, param)?;
                let rhs = lower_predicate(&binary.right, param)?;
                Ok(quote! { (#lhs).and(#rhs) })
            },
            BinOp::Or(_) => {
                let lhs = lower_predicate(&binary.left, param)?;
                let rhs = lower_predicate(&binary.right, param)?;
                Ok(quote! { (#lhs).or(#rhs) })
            },
            BinOp::Eq(_) => comparison(binary, "eq", param),
            BinOp::Ne(_) => comparison(binary, "ne", param),
            BinOp::Gt(_) => comparison(binary, "gt", param),
            BinOp::Ge(_) => comparison(binary, "ge", param),
            BinOp::Lt(_) => comparison(binary, "lt", param),
            BinOp::Le(_) => comparison(binary, "le", param),
            ref op => Err(syn::Error::new(
                op.span(),
                "This operator has no SQL translation in a condition.\n\
                 Conditions are built from == != > >= < <= combined with && || !",
            )),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Not(_)) => {
            let inner = lower_predicate(&unary.expr, param)?;
            Ok(quote! { !(#inner) })
        },
        Expr::Paren(paren) => lower_predicate(&paren.expr, param),
        Expr::Group(group) => lower_predicate(&group.expr, param),
        other => Err(syn::Error::new(
            other.span(),
            "Expected a comparison or a logical combination.\n\
             Bare values are not conditions; compare explicitly, e.g. `u.active == true`.",
        )),
    }
}

fn comparison(binary: &syn::ExprBinary, method: &str, param: &syn::Ident) -> Result<TokenStream2> {
    let lhs = lower_operand(&binary.left, param)?;
    let rhs = lower_operand(&binary.right, param)?;
    let method = syn::Ident::new(method, binary.op.span());
    Ok(quote! { (#lhs).#method(#rhs) })
}

// ============================================================================
// Operand position: columns, literals, arithmetic
// ============================================================================

fn lower_operand(expr: &Expr, param: &syn::Ident) -> Result<TokenStream2> {
    if !mentions_param(expr, param) {
        // Evaluated once where the macro is used, then bound as a literal.
        return Ok(quote! { ::sqlward::lit(#expr) });
    }
    match expr {
        Expr::Field(field) => column(field, param),
        Expr::Paren(paren) => lower_operand(&paren.expr, param),
        Expr::Group(group) => lower_operand(&group.expr, param),
        Expr::Binary(binary) => {
            let op = &binary.op;
            if !matches!(
                op,
                BinOp::Add(_) | BinOp::Sub(_) | BinOp::Mul(_) | BinOp::Div(_)
            ) {
                return Err(syn::Error::new(
                    op.span(),
                    "Only + - * / are allowed inside a comparison operand.",
                ));
            }
            let lhs = lower_operand(&binary.left, param)?;
            let rhs = lower_operand(&binary.right, param)?;
            Ok(quote! { ((#lhs) #op (#rhs)) })
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            let inner = lower_operand(&unary.expr, param)?;
            Ok(quote! { (-(#inner)) })
        },
        other => Err(syn::Error::new(
            other.span(),
            format!(
                "Cannot translate this use of `{param}` into SQL.\n\
                 Only direct field access (`{param}.age`), comparisons, and + - * / are \
                 translated; everything else must not mention `{param}`."
            ),
        )),
    }
}

fn column(field: &syn::ExprField, param: &syn::Ident) -> Result<TokenStream2> {
    let base_is_param = matches!(
        &*field.base,
        Expr::Path(path) if path.path.is_ident(param)
    );
    if !base_is_param {
        return Err(syn::Error::new(
            field.span(),
            format!(
                "Only direct fields of `{param}` name columns.\n\
                 Nested access like `{param}.address.city` has no SQL translation."
            ),
        ));
    }
    match &field.member {
        syn::Member::Named(ident) => {
            let name = ident.unraw().to_string();
            Ok(quote! { ::sqlward::col(#name) })
        },
        syn::Member::Unnamed(index) => Err(syn::Error::new(
            index.span,
            "Tuple fields have no column name; use a struct with named fields.",
        )),
    }
}

/// Token-level scan: any appearance of the parameter counts, so a
/// shadowed or embedded use can never slip into host evaluation.
fn mentions_param(expr: &Expr, param: &syn::Ident) -> bool {
    fn scan(tokens: TokenStream2, param: &syn::Ident) -> bool {
        tokens.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => ident == *param,
            TokenTree::Group(group) => scan(group.stream(), param),
            _ => false,
        })
    }
    scan(expr.to_token_stream(), param)
}
