use super::diagnostic::TokenKind;

/// A set of token kinds an operator position accepts.
///
/// `Peek` enables the combinators to inspect the next token to decide
/// whether an operator applies, without consuming it. A single kind, an
/// array of kinds and a slice of kinds are all operator sets.
///
/// # Example
///
/// ```ignore
/// // additive ::= multiplicative (('+' | '-') multiplicative)*
/// parse_left_infix(p, s, &[Tok::Plus, Tok::Minus], rule(Rule::Mul, multiplicative))
/// ```
pub trait Peek<K> {
    /// Check if `kind` is in the set.
    fn is(&self, kind: K) -> bool;
}

impl<K: TokenKind> Peek<K> for K {
    #[inline]
    fn is(&self, kind: K) -> bool {
        *self == kind
    }
}

impl<K: TokenKind, const N: usize> Peek<K> for [K; N] {
    #[inline]
    fn is(&self, kind: K) -> bool {
        self.contains(&kind)
    }
}

impl<K: TokenKind> Peek<K> for [K] {
    #[inline]
    fn is(&self, kind: K) -> bool {
        self.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::testing::Tok;

    #[test]
    fn operator_sets() {
        assert!(Tok::Plus.is(Tok::Plus));
        assert!(!Tok::Plus.is(Tok::Minus));
        assert!([Tok::Plus, Tok::Minus].is(Tok::Minus));
        let ops: &[Tok] = &[Tok::Star];
        assert!(ops.is(Tok::Star));
        assert!(!ops.is(Tok::Plus));
    }
}
