#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Calc Example
//!
//! A small expression language built on frontkit:
//!
//! - integers with `+ - * /`, unary `-` and `!`, and parentheses;
//! - lists `[1, 2, 3]`, concatenated with `+`;
//! - blocks `{ a b c }` evaluating to their last expression;
//! - `let name = expr in expr` scoping, resolved through the symbol
//!   table's binding stacks.
//!
//! ```text
//! let x = 2 in
//! let y = x * 3 in
//!   [x, y, -(x - y)]
//! ```

use std::sync::Arc;

use frontkit::{
    Buffer, Grammar, Outcome, ParseConfig, Parser, RecursionGuard, Stream, SymbolTable,
    TokenCursor, input,
};

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parse;

pub use ast::Expr;
pub use error::{CalcError, Position};
pub use eval::Value;
pub use parse::{Cursor, Rule};

/// An evaluation session.
///
/// Symbols interned by one evaluation stay interned for the next; bindings
/// never outlive the evaluation that made them.
pub struct Calc {
    grammar: Grammar<Rule>,
    symbols: SymbolTable<Value>,
    config: ParseConfig,
    depth: RecursionGuard,
    diagnostics: Vec<CalcError>,
}

impl Default for Calc {
    fn default() -> Self {
        Self::new()
    }
}

impl Calc {
    pub fn new() -> Self {
        Self::with_config(ParseConfig::DEFAULT)
    }

    pub fn with_config(config: ParseConfig) -> Self {
        let mut symbols = SymbolTable::new();
        lexer::install_keywords(&mut symbols);
        Self {
            grammar: Grammar::from_rules(),
            symbols,
            config,
            depth: RecursionGuard::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable<Value> {
        &self.symbols
    }

    /// Diagnostics reported while parsing the last input.
    pub fn diagnostics(&self) -> &[CalcError] {
        &self.diagnostics
    }

    pub fn evaluate(&mut self, src: &str) -> Result<Value, CalcError> {
        self.run(Buffer::unindexed(src))
    }

    /// Evaluate `src`, naming it `name` in the input context.
    pub fn evaluate_named(&mut self, name: &str, src: &str) -> Result<Value, CalcError> {
        self.run(Buffer::unindexed(src).with_name(name))
    }

    /// Parse `src` without evaluating it.
    pub fn parse(&mut self, src: &str) -> Result<Expr, CalcError> {
        let (buffer, mut cursor) = self.load(Buffer::unindexed(src))?;
        input::with_input(buffer, || self.parse_tokens(&mut cursor))
    }

    fn run(&mut self, buffer: Buffer) -> Result<Value, CalcError> {
        let (buffer, mut cursor) = self.load(buffer)?;
        input::with_input(buffer, || {
            let expr = self.parse_tokens(&mut cursor)?;
            eval::eval(&expr, &mut self.symbols)
        })
    }

    fn load(&mut self, mut buffer: Buffer) -> Result<(Arc<Buffer>, Cursor), CalcError> {
        self.diagnostics.clear();
        let tokens = lexer::lex(&mut buffer, &mut self.symbols)?;
        let end = buffer.end_location();
        Ok((
            Arc::new(buffer),
            TokenCursor::with_config(tokens, end, self.config),
        ))
    }

    fn parse_tokens(&mut self, cursor: &mut Cursor) -> Result<Expr, CalcError> {
        self.depth.reset();
        match (parse::program(self, cursor), cursor.limit_error()) {
            (Outcome::Match(expr), _) => {
                cursor.finish()?;
                Ok(expr)
            }
            (_, Some(err)) => {
                // anything reported at the cut describes a false end of input
                self.diagnostics.clear();
                Err(err.into())
            }
            (Outcome::NoMatch, None) => Err(self.on_expected(cursor.location(), "expression")),
            (Outcome::Error(err), None) => Err(err),
        }
    }
}
