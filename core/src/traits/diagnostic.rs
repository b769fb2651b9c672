use core::fmt::Debug;

/// A token kind the combinators can match on.
///
/// Kinds are compared for equality only; the library never interprets
/// them otherwise. The spelling is what diagnostics print, e.g. `)` in
/// "expected )".
pub trait TokenKind: Copy + Eq + Debug {
    /// Spelling used in "expected ..." messages.
    fn spelling(&self) -> &'static str;
}

/// Punctuation kinds the list and enclosure combinators rely on.
pub trait Punctuation: TokenKind {
    const COMMA: Self;
    const LPAREN: Self;
    const RPAREN: Self;
    const LBRACE: Self;
    const RBRACE: Self;
    const LBRACKET: Self;
    const RBRACKET: Self;
}
