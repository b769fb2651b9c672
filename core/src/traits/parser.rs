use super::stream::Stream;
use crate::parsing::{Grammar, RuleId};
use crate::source::Location;

/// The parser capability a grammar supplies to the combinators.
///
/// The combinators decide *when* a construct has been recognised; the
/// parser decides *what* it means. Each `on_*` hook is a semantic action
/// building the grammar's output (an AST node, a value, ...). A hook may
/// itself fail, in which case the combinator yields
/// [`Outcome::Error`](crate::Outcome::Error) with the returned error.
///
/// # Associated Types
///
/// - `Output`: what rules produce (e.g., `Box<Expr>`)
/// - `Error`: the error marker carried by [`Outcome::Error`](crate::Outcome::Error)
/// - `Rule`: the grammar's stable rule identifier, used to look up display
///   names for diagnostics
///
/// # Example
///
/// ```ignore
/// impl Parser<TokenCursor<Tok>> for Calc {
///     type Output = Expr;
///     type Error = CalcError;
///     type Rule = Rule;
///
///     fn grammar(&self) -> &Grammar<Rule> {
///         &self.grammar
///     }
///
///     fn on_infix(&mut self, op: Tok, lhs: Expr, rhs: Expr) -> Result<Expr, CalcError> {
///         Ok(Expr::binary(op.kind(), lhs, rhs))
///     }
///
///     // ...
/// }
/// ```
pub trait Parser<S: Stream> {
    type Output;
    type Error;
    type Rule: RuleId;

    /// Display names of the grammar's rules.
    fn grammar(&self) -> &Grammar<Self::Rule>;

    /// A `sequence` finished; `elements` are in input order and may be empty.
    fn on_sequence(&mut self, elements: Vec<Self::Output>) -> Result<Self::Output, Self::Error>;

    /// A comma separated `list` finished; `elements` is never empty.
    fn on_list(&mut self, elements: Vec<Self::Output>) -> Result<Self::Output, Self::Error>;

    /// An enclosure finished. `inner` is `None` for the empty enclosure.
    fn on_enclosure(
        &mut self,
        open: S::Token,
        close: S::Token,
        inner: Option<Self::Output>,
    ) -> Result<Self::Output, Self::Error>;

    fn on_prefix(&mut self, op: S::Token, operand: Self::Output)
    -> Result<Self::Output, Self::Error>;

    fn on_infix(
        &mut self,
        op: S::Token,
        lhs: Self::Output,
        rhs: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    /// Record an "expected `expected`" diagnostic at `location` and return
    /// the error marker that aborts the parse.
    fn on_expected(&mut self, location: Location, expected: &str) -> Self::Error;

    /// The bare error marker, for failures already reported elsewhere.
    fn on_error(&mut self) -> Self::Error;

    /// Called before the combinators descend into an enclosure's contents.
    ///
    /// Parsers that bound nesting depth (see
    /// [`RecursionGuard`](crate::RecursionGuard)) return an error here once
    /// the limit is reached.
    #[inline]
    fn enter_nested(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after an enclosure's contents were parsed, whatever the
    /// outcome.
    #[inline]
    fn exit_nested(&mut self) {}
}
