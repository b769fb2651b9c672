#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! A toolkit for language front ends: source buffers and line maps,
//! symbol interning with scoped bindings, and recursive-descent parsing
//! combinators.
//!
//! This crate re-exports `frontkit-core` together with the
//! `#[derive(TokenKind)]` and `#[derive(GrammarRule)]` macros.
pub use frontkit_core::*;
pub use frontkit_macros::*;
