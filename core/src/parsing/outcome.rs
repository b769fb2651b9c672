/// Result of applying a rule at the current position.
///
/// Three structurally distinct outcomes:
///
/// - `Match`: the rule applied and produced a value.
/// - `NoMatch`: the rule did not apply here and consumed nothing; the
///   caller may try an alternative.
/// - `Error`: the rule committed and then failed. The error has already
///   been reported; propagate it unchanged and do not try alternatives.
///
/// # Example
///
/// ```ignore
/// // primary ::= number | identifier | '(' expr ')'
/// fn primary(p: &mut Calc, s: &mut Cursor) -> Outcome<Expr, CalcError> {
///     number(p, s)
///         .or_else(|| identifier(p, s))
///         .or_else(|| parse_paren_enclosed(p, s, rule(Rule::Expr, expr)))
/// }
/// ```
#[must_use = "an outcome may carry an error that must be propagated"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E> {
    Match(T),
    NoMatch,
    Error(E),
}

impl<T, E> Outcome<T, E> {
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }

    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Outcome::NoMatch)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// The matched value, discarding any error.
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Match(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn err(self) -> Option<E> {
        match self {
            Outcome::Error(err) => Some(err),
            _ => None,
        }
    }

    #[inline]
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Match(value) => Outcome::Match(value),
            Outcome::NoMatch => Outcome::NoMatch,
            Outcome::Error(err) => Outcome::Error(err),
        }
    }

    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Outcome::Match(value) => Outcome::Match(f(value)),
            Outcome::NoMatch => Outcome::NoMatch,
            Outcome::Error(err) => Outcome::Error(err),
        }
    }

    #[inline]
    pub fn map_err<G, F: FnOnce(E) -> G>(self, f: F) -> Outcome<T, G> {
        match self {
            Outcome::Match(value) => Outcome::Match(value),
            Outcome::NoMatch => Outcome::NoMatch,
            Outcome::Error(err) => Outcome::Error(f(err)),
        }
    }

    /// Continue with `f` after a match.
    #[inline]
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U, E>>(self, f: F) -> Outcome<U, E> {
        match self {
            Outcome::Match(value) => f(value),
            Outcome::NoMatch => Outcome::NoMatch,
            Outcome::Error(err) => Outcome::Error(err),
        }
    }

    /// Try an alternative, but only if this rule did not apply. Errors are
    /// never retried.
    #[inline]
    pub fn or_else<F: FnOnce() -> Outcome<T, E>>(self, f: F) -> Outcome<T, E> {
        match self {
            Outcome::NoMatch => f(),
            other => other,
        }
    }

    /// Turn a no-match into the error produced by `f`.
    #[inline]
    pub fn or_error<F: FnOnce() -> E>(self, f: F) -> Outcome<T, E> {
        match self {
            Outcome::NoMatch => Outcome::Error(f()),
            other => other,
        }
    }

    /// `Ok(Some(_))` on a match, `Ok(None)` on no-match.
    #[inline]
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            Outcome::Match(value) => Ok(Some(value)),
            Outcome::NoMatch => Ok(None),
            Outcome::Error(err) => Err(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Match(value),
            Err(err) => Outcome::Error(err),
        }
    }
}

/// Unwrap a match, or return the no-match or error from the enclosing
/// rule. Accepts an [`Outcome`] or a `Result` from a parser hook.
///
/// ```ignore
/// let lhs = try_outcome!(operand(p, s));
/// let node = try_outcome!(p.on_infix(op, lhs, rhs));
/// ```
#[macro_export]
macro_rules! try_outcome {
    ($e:expr $(,)?) => {
        match $crate::Outcome::from($e) {
            $crate::Outcome::Match(value) => value,
            $crate::Outcome::NoMatch => return $crate::Outcome::NoMatch,
            $crate::Outcome::Error(err) => return $crate::Outcome::Error(err),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    type Out = Outcome<i32, &'static str>;

    #[test]
    fn or_else_only_retries_no_match() {
        let tried = Out::NoMatch.or_else(|| Outcome::Match(2));
        assert_eq!(tried, Outcome::Match(2));

        let kept = Out::Error("committed").or_else(|| Outcome::Match(2));
        assert_eq!(kept, Outcome::Error("committed"));

        let first = Out::Match(1).or_else(|| Outcome::Match(2));
        assert_eq!(first, Outcome::Match(1));
    }

    #[test]
    fn conversions() {
        assert_eq!(Out::from(Ok::<i32, &str>(3)), Outcome::Match(3));
        assert_eq!(Out::Error("e").into_result(), Err("e"));
        assert_eq!(Out::NoMatch.into_result(), Ok(None));
        assert_eq!(Out::NoMatch.or_error(|| "expected").err(), Some("expected"));
    }

    #[test]
    fn try_outcome_propagates() {
        fn twice(o: Out) -> Out {
            let v = try_outcome!(o);
            Outcome::Match(v * 2)
        }

        assert_eq!(twice(Outcome::Match(4)), Outcome::Match(8));
        assert_eq!(twice(Outcome::NoMatch), Outcome::NoMatch);
        assert_eq!(twice(Outcome::Error("bad")), Outcome::Error("bad"));
    }
}
