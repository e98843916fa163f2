//! # SCPI Tree Macro
//!
//! Expands a command tree declaration into `scpi_core` builder calls.
//!
//! ## Notation
//! - `KEYword { ... }` declares a level and its sub-levels.
//! - `[KEYword]` declares the level as optional.
//! - `KEYword => path::to::handler` attaches a handler function.
//! - Sub-levels are separated by commas; a level without braces is a leaf.
//!
//! Exactly one root level is accepted. Keywords are validated while the
//! declaration is parsed, so a bad keyword is a compile error anchored to
//! the identifier instead of a panic when the tree is first built.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, bracketed, parse_macro_input, Ident, LitStr, Result, Token};

/// One declared level: keyword, optional marker, handler path, sub-levels.
struct TreeNode {
    keyword: Ident,
    optional: bool,
    handler: Option<syn::Path>,
    children: Vec<TreeNode>,
}

/// The whole declaration, a single root level.
struct TreeInput {
    root: TreeNode,
}

impl Parse for TreeNode {
    fn parse(input: ParseStream) -> Result<Self> {
        // `[KEYword]` marks the level optional
        let (keyword, optional) = if input.peek(syn::token::Bracket) {
            let inner;
            bracketed!(inner in input);
            let keyword: Ident = inner.parse()?;
            if !inner.is_empty() {
                return Err(inner.error("expected a single keyword inside the brackets"));
            }
            (keyword, true)
        } else {
            (input.parse()?, false)
        };
        validate_keyword(&keyword)?;

        let handler = if input.peek(Token![=>]) {
            input.parse::<Token![=>]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        let children = if input.peek(syn::token::Brace) {
            let inner;
            braced!(inner in input);
            inner
                .parse_terminated(TreeNode::parse, Token![,])?
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };

        Ok(TreeNode {
            keyword,
            optional,
            handler,
            children,
        })
    }
}

impl Parse for TreeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let root: TreeNode = input.parse()?;
        if !input.is_empty() {
            return Err(input.error("expected a single root level"));
        }
        Ok(TreeInput { root })
    }
}

/// Rejects keywords the tree builder would refuse at runtime.
fn validate_keyword(keyword: &Ident) -> Result<()> {
    let text = keyword.to_string();
    let starts_upper = text
        .as_bytes()
        .first()
        .is_some_and(|b| b.is_ascii_uppercase());
    if !starts_upper {
        return Err(syn::Error::new(
            keyword.span(),
            "command keywords must start with an uppercase ASCII letter",
        ));
    }
    Ok(())
}

/// Emits the builder expression for one level and its subtree.
fn emit_node(node: &TreeNode) -> TokenStream2 {
    let keyword = LitStr::new(&node.keyword.to_string(), node.keyword.span());
    let mut expr = quote! { ::scpi_core::Node::new(#keyword) };
    if node.optional {
        expr = quote! { #expr.optional() };
    }
    if let Some(handler) = &node.handler {
        expr = quote! { #expr.handler(#handler) };
    }
    for child in &node.children {
        let child_expr = emit_node(child);
        expr = quote! { #expr.child(#child_expr) };
    }
    expr
}

/// Expands a tree declaration into a `scpi_core::Node` expression.
pub fn scpi_tree_impl(input: TokenStream) -> TokenStream {
    let TreeInput { root } = parse_macro_input!(input as TreeInput);
    let expr = emit_node(&root);
    TokenStream::from(expr)
}
