use super::parser::Parser;
use super::stream::Stream;
use crate::parsing::Outcome;

/// A grammar production the combinators treat as an opaque unit.
///
/// Rules carry a stable identifier so that a failed attempt can be
/// reported as "expected <rule name>" through the parser's
/// [`Grammar`](crate::Grammar). Build one from a function with [`rule`].
pub trait Rule<P, S>
where
    S: Stream,
    P: Parser<S>,
{
    fn id(&self) -> P::Rule;

    fn parse(&mut self, parser: &mut P, stream: &mut S) -> Outcome<P::Output, P::Error>;
}

impl<P, S, R> Rule<P, S> for &mut R
where
    S: Stream,
    P: Parser<S>,
    R: Rule<P, S> + ?Sized,
{
    #[inline]
    fn id(&self) -> P::Rule {
        (**self).id()
    }

    #[inline]
    fn parse(&mut self, parser: &mut P, stream: &mut S) -> Outcome<P::Output, P::Error> {
        (**self).parse(parser, stream)
    }
}

/// A parsing function paired with its rule identifier.
#[derive(Debug, Clone, Copy)]
pub struct NamedRule<R, F> {
    id: R,
    f: F,
}

/// Name a parsing function.
///
/// ```ignore
/// fn primary(p: &mut Calc, s: &mut Cursor) -> Outcome<Expr, CalcError> { ... }
///
/// parse_prefix(p, s, &Tok::Minus, rule(Rule::Primary, primary))
/// ```
#[inline]
pub fn rule<R, F>(id: R, f: F) -> NamedRule<R, F> {
    NamedRule { id, f }
}

impl<P, S, F> Rule<P, S> for NamedRule<P::Rule, F>
where
    S: Stream,
    P: Parser<S>,
    F: FnMut(&mut P, &mut S) -> Outcome<P::Output, P::Error>,
{
    #[inline]
    fn id(&self) -> P::Rule {
        self.id
    }

    #[inline]
    fn parse(&mut self, parser: &mut P, stream: &mut S) -> Outcome<P::Output, P::Error> {
        (self.f)(parser, stream)
    }
}
