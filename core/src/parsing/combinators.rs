//! Generic recursive-descent combinators.
//!
//! Each combinator takes the grammar's [`Parser`] and [`Stream`] plus one
//! inner [`Rule`], and returns an [`Outcome`]:
//!
//! - no-match is returned only when nothing was consumed and the
//!   construct simply is not present;
//! - once a combinator has committed (consumed an opening token or an
//!   operator) every failure is reported through
//!   [`Parser::on_expected`] and returned as an error;
//! - errors from the inner rule or from a parser hook propagate unchanged.

use super::Outcome;
use super::tokens::{expect_token, match_any, match_token};
use crate::source::Location;
use crate::traits::{KindOf, Parser, Peek, Punctuation, Rule, Stream, Token};

/// Report "expected <rule name>" at `loc`.
fn expected_rule<P, S, R>(p: &mut P, rule: &R, loc: Location) -> P::Error
where
    S: Stream,
    P: Parser<S>,
    R: Rule<P, S>,
{
    let name = p.grammar().name(rule.id());
    log::trace!(target: "frontkit::parse", "expected {} at offset {}", name, loc.offset());
    p.on_expected(loc, name)
}

/// Apply `rule`, turning a no-match into "expected <rule name>".
///
/// ```text
/// expected(rule) ::= rule
/// ```
pub fn parse_expected<P, S, R>(p: &mut P, s: &mut S, mut rule: R) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    P: Parser<S>,
    R: Rule<P, S>,
{
    let loc = s.location();
    match rule.parse(p, s) {
        Outcome::NoMatch => Outcome::Error(expected_rule::<_, S, _>(p, &rule, loc)),
        other => other,
    }
}

/// Parse a production enclosed by a pair of tokens.
///
/// ```text
/// enclosed ::= open [rule] close
/// ```
///
/// No-match if `open` is absent. The empty enclosure is accepted without
/// invoking `rule`; the parser sees it as
/// `on_enclosure(open, close, None)`.
pub fn parse_enclosed<P, S, R>(
    p: &mut P,
    s: &mut S,
    open: KindOf<S>,
    close: KindOf<S>,
    mut rule: R,
) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    P: Parser<S>,
    R: Rule<P, S>,
{
    let Some(left) = match_token(s, open) else {
        return Outcome::NoMatch;
    };
    if let Some(right) = match_token(s, close) {
        return p.on_enclosure(left, right, None).into();
    }

    if let Err(err) = p.enter_nested() {
        return Outcome::Error(err);
    }
    let inner = rule.parse(p, s);
    p.exit_nested();

    match inner {
        Outcome::Match(mid) => {
            let right = crate::try_outcome!(expect_token(p, s, close));
            p.on_enclosure(left, right, Some(mid)).into()
        }
        Outcome::NoMatch => {
            let loc = s.location();
            Outcome::Error(expected_rule::<_, S, _>(p, &rule, loc))
        }
        Outcome::Error(err) => Outcome::Error(err),
    }
}

/// ```text
/// paren-enclosed ::= '(' [rule] ')'
/// ```
#[inline]
pub fn parse_paren_enclosed<P, S, R>(p: &mut P, s: &mut S, rule: R) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    KindOf<S>: Punctuation,
    P: Parser<S>,
    R: Rule<P, S>,
{
    parse_enclosed(p, s, KindOf::<S>::LPAREN, KindOf::<S>::RPAREN, rule)
}

/// ```text
/// brace-enclosed ::= '{' [rule] '}'
/// ```
#[inline]
pub fn parse_brace_enclosed<P, S, R>(p: &mut P, s: &mut S, rule: R) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    KindOf<S>: Punctuation,
    P: Parser<S>,
    R: Rule<P, S>,
{
    parse_enclosed(p, s, KindOf::<S>::LBRACE, KindOf::<S>::RBRACE, rule)
}

/// ```text
/// bracket-enclosed ::= '[' [rule] ']'
/// ```
#[inline]
pub fn parse_bracket_enclosed<P, S, R>(
    p: &mut P,
    s: &mut S,
    rule: R,
) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    KindOf<S>: Punctuation,
    P: Parser<S>,
    R: Rule<P, S>,
{
    parse_enclosed(p, s, KindOf::<S>::LBRACKET, KindOf::<S>::RBRACKET, rule)
}

/// Parse a prefix term.
///
/// ```text
/// prefix ::= rule | op prefix
/// ```
///
/// Stacked operators nest to the right: `- - x` folds as
/// `on_prefix(-, on_prefix(-, x))`. Operators are collected iteratively,
/// so deep stacks do not grow the call stack.
pub fn parse_prefix<P, S, O, R>(
    p: &mut P,
    s: &mut S,
    op: &O,
    mut rule: R,
) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    P: Parser<S>,
    O: Peek<KindOf<S>> + ?Sized,
    R: Rule<P, S>,
{
    let mut ops = Vec::new();
    while let Some(tok) = match_any(s, op) {
        ops.push(tok);
    }

    let mut term = match rule.parse(p, s) {
        Outcome::Match(term) => term,
        Outcome::NoMatch if ops.is_empty() => return Outcome::NoMatch,
        Outcome::NoMatch => {
            let loc = s.location();
            return Outcome::Error(expected_rule::<_, S, _>(p, &rule, loc));
        }
        Outcome::Error(err) => return Outcome::Error(err),
    };

    while let Some(tok) = ops.pop() {
        term = crate::try_outcome!(p.on_prefix(tok, term));
    }
    Outcome::Match(term)
}

/// Parse a left associative binary term.
///
/// ```text
/// left-infix ::= rule | left-infix op rule
/// ```
///
/// `1 + 2 + 3` folds as `on_infix(+, on_infix(+, 1, 2), 3)`. A missing
/// right operand is reported at the operator's location.
pub fn parse_left_infix<P, S, O, R>(
    p: &mut P,
    s: &mut S,
    op: &O,
    mut rule: R,
) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    P: Parser<S>,
    O: Peek<KindOf<S>> + ?Sized,
    R: Rule<P, S>,
{
    let mut lhs = crate::try_outcome!(rule.parse(p, s));
    while let Some(tok) = match_any(s, op) {
        let at = tok.location();
        let rhs = match rule.parse(p, s) {
            Outcome::Match(rhs) => rhs,
            Outcome::NoMatch => {
                return Outcome::Error(expected_rule::<_, S, _>(p, &rule, at));
            }
            Outcome::Error(err) => return Outcome::Error(err),
        };
        lhs = crate::try_outcome!(p.on_infix(tok, lhs, rhs));
    }
    Outcome::Match(lhs)
}

/// Parse a sequence of terms with no intervening tokens.
///
/// ```text
/// sequence ::= <empty> | rule sequence
/// ```
///
/// Stops at end of input or at the first no-match, and hands the elements
/// collected so far to `on_sequence`. An error abandons the sequence.
pub fn parse_sequence<P, S, R>(p: &mut P, s: &mut S, mut rule: R) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    P: Parser<S>,
    R: Rule<P, S>,
{
    let mut seq = Vec::new();
    while !s.is_eof() {
        match rule.parse(p, s) {
            Outcome::Match(elem) => seq.push(elem),
            Outcome::NoMatch => break,
            Outcome::Error(err) => return Outcome::Error(err),
        }
    }
    p.on_sequence(seq).into()
}

/// Parse a non-empty comma-separated list of terms.
///
/// ```text
/// list ::= rule (',' rule)*
/// ```
///
/// A missing element, first or after a comma, is reported as
/// "expected `expected`" at the location where it should have started.
pub fn parse_list<P, S, R>(
    p: &mut P,
    s: &mut S,
    mut rule: R,
    expected: &str,
) -> Outcome<P::Output, P::Error>
where
    S: Stream,
    KindOf<S>: Punctuation,
    P: Parser<S>,
    R: Rule<P, S>,
{
    let mut list = Vec::new();
    loop {
        let loc = s.location();
        match rule.parse(p, s) {
            Outcome::Match(elem) => list.push(elem),
            Outcome::NoMatch => return Outcome::Error(p.on_expected(loc, expected)),
            Outcome::Error(err) => return Outcome::Error(err),
        }
        if match_token(s, KindOf::<S>::COMMA).is_none() {
            break;
        }
    }
    p.on_list(list).into()
}
