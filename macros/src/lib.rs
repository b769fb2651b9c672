#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Derive macros for the frontkit toolkit.
//!
//! - [`TokenKind`](derive@TokenKind): diagnostic spellings for a token kind
//!   enum, plus `Punctuation` when the bracket and comma kinds are marked;
//! - [`GrammarRule`](derive@GrammarRule): rule display names for
//!   `Grammar::from_rules`.
//!
//! The generated impls name the `frontkit` facade crate, so depend on
//! `frontkit` rather than on this crate directly.
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod grammar_rule;
mod token_kind;

/// Convert PascalCase to lower-case words: `IntLiteral` → `int literal`.
pub(crate) fn to_words(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push(' ');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Implements `frontkit::TokenKind` for a fieldless enum.
///
/// A variant's spelling is taken from, in order: a `#[spelling("..")]`
/// attribute, the literal of a logos `#[token("..")]` attribute, or the
/// variant name split into words.
///
/// Marking variants with `#[punct(comma)]`, `#[punct(lparen)]`, ... also
/// implements `frontkit::Punctuation`; all seven roles (`comma`, `lparen`,
/// `rparen`, `lbrace`, `rbrace`, `lbracket`, `rbracket`) must then be
/// assigned.
///
/// ```ignore
/// #[derive(Logos, TokenKind, Debug, Clone, Copy, PartialEq, Eq)]
/// #[logos(skip r"[ \t\n]+")]
/// enum Kind {
///     #[regex("[0-9]+")]
///     #[spelling("number")]
///     Number,
///     #[token("+")]
///     Plus,
///     #[token(",")]
///     #[punct(comma)]
///     Comma,
///     // ...
/// }
///
/// assert_eq!(Kind::Plus.spelling(), "+");
/// ```
#[proc_macro_derive(TokenKind, attributes(spelling, punct))]
pub fn derive_token_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    token_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `frontkit::GrammarRule` for a fieldless enum.
///
/// `#[name("..")]` sets the name used in "expected <name>" diagnostics;
/// without it the variant name is split into words.
///
/// ```ignore
/// #[derive(GrammarRule, Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Rule {
///     #[name("expression")]
///     Expr,
///     PrimaryExpression, // "primary expression"
/// }
/// ```
#[proc_macro_derive(GrammarRule, attributes(name))]
pub fn derive_grammar_rule(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    grammar_rule::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
