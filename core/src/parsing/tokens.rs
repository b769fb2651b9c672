//! Token-level primitives the combinators are built from.

use super::Outcome;
use crate::contract::contract_violation;
use crate::traits::{KindOf, Parser, Peek, Stream, Token, TokenKind};

/// Consume the next token if it has kind `kind`.
///
/// Returns `None` without side effects otherwise.
#[inline]
pub fn match_token<S: Stream>(s: &mut S, kind: KindOf<S>) -> Option<S::Token> {
    match_if(s, |tok| tok.kind() == kind)
}

/// Consume the next token if it satisfies `pred`.
#[inline]
pub fn match_if<S, F>(s: &mut S, pred: F) -> Option<S::Token>
where
    S: Stream,
    F: FnOnce(&S::Token) -> bool,
{
    if s.peek().is_some_and(pred) {
        s.next()
    } else {
        None
    }
}

/// Consume the next token if its kind is in the operator set `ops`.
#[inline]
pub fn match_any<S, O>(s: &mut S, ops: &O) -> Option<S::Token>
where
    S: Stream,
    O: Peek<KindOf<S>> + ?Sized,
{
    match_if(s, |tok| ops.is(tok.kind()))
}

/// Consume the next token if it has kind `kind`, otherwise report
/// "expected <spelling>" at the current location.
pub fn expect_token<P, S>(p: &mut P, s: &mut S, kind: KindOf<S>) -> Outcome<S::Token, P::Error>
where
    S: Stream,
    P: Parser<S>,
{
    match match_token(s, kind) {
        Some(tok) => Outcome::Match(tok),
        None => {
            let loc = s.location();
            log::trace!(
                target: "frontkit::parse",
                "expected {} at offset {}",
                kind.spelling(),
                loc.offset()
            );
            Outcome::Error(p.on_expected(loc, kind.spelling()))
        }
    }
}

/// Consume a token the grammar has already established is next.
///
/// Use after lookahead has guaranteed the kind; a mismatch here is a bug
/// in the grammar, not malformed input, and panics.
#[track_caller]
pub fn require_token<S: Stream>(s: &mut S, kind: KindOf<S>) -> S::Token {
    match match_token(s, kind) {
        Some(tok) => tok,
        None => contract_violation!(
            "required token '{}', found {}",
            kind.spelling(),
            s.peek_kind().map_or("end of input", |k| k.spelling())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::testing::{Tok, cursor, parser};
    use crate::source::Location;

    #[test]
    fn match_token_has_no_side_effect_on_miss() {
        let mut s = cursor("a + b");
        assert!(match_token(&mut s, Tok::Plus).is_none());
        assert_eq!(s.cursor(), 0);
        assert!(match_token(&mut s, Tok::Ident).is_some());
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn match_any_accepts_operator_sets() {
        let mut s = cursor("- +");
        assert!(match_any(&mut s, &[Tok::Plus, Tok::Minus]).is_some());
        assert!(match_any(&mut s, &Tok::Plus).is_some());
        assert!(match_any(&mut s, [Tok::Star].as_slice()).is_none());
        assert!(s.is_eof());
    }

    #[test]
    fn expect_token_reports_spelling_at_current_location() {
        let mut s = cursor("a b");
        let mut p = parser();
        assert!(expect_token(&mut p, &mut s, Tok::Ident).is_match());
        assert!(expect_token(&mut p, &mut s, Tok::RParen).is_error());
        assert_eq!(p.diagnostics, vec![(Location::new(2), ")".to_string())]);
        // The offending token is left in place.
        assert!(s.next_is(Tok::Ident));
    }

    #[test]
    fn expect_token_at_end_of_input_points_past_the_text() {
        let mut s = cursor("a");
        let mut p = parser();
        let _ = match_token(&mut s, Tok::Ident);
        assert!(expect_token(&mut p, &mut s, Tok::Comma).is_error());
        assert_eq!(p.diagnostics, vec![(Location::new(1), ",".to_string())]);
    }

    #[test]
    fn require_token_consumes_when_present() {
        let mut s = cursor("(");
        let tok = require_token(&mut s, Tok::LParen);
        assert_eq!(tok.kind(), Tok::LParen);
    }

    #[test]
    #[should_panic(expected = "required token ')', found +")]
    fn require_token_mismatch_is_a_contract_violation() {
        let mut s = cursor("+");
        require_token(&mut s, Tok::RParen);
    }
}
