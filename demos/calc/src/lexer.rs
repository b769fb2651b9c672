//! Tokens and the lexer.
//!
//! `logos` recognises the token shapes; keywords are not separate patterns
//! but identifiers whose symbol is registered as a keyword, so the symbol
//! table decides which names are reserved.

use frontkit::{
    Buffer, Location, Span, SymbolDescriptor, SymbolId, SymbolKind, SymbolTable, Token,
    TokenKind,
};
use logos::Logos;

use crate::error::{CalcError, Position};

pub const IDENTIFIER: SymbolKind = SymbolKind(1);
pub const KEYWORD: SymbolKind = SymbolKind(2);

#[derive(Logos, TokenKind, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Kind {
    #[token("\n")]
    #[spelling("newline")]
    Newline,

    #[regex("[0-9]+")]
    #[spelling("number")]
    Number,

    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    #[spelling("identifier")]
    Ident,

    #[spelling("'let'")]
    Let,

    #[spelling("'in'")]
    In,

    #[token("=")]
    Assign,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("!")]
    Bang,

    #[token(",")]
    #[punct(comma)]
    Comma,

    #[token("(")]
    #[punct(lparen)]
    LParen,

    #[token(")")]
    #[punct(rparen)]
    RParen,

    #[token("{")]
    #[punct(lbrace)]
    LBrace,

    #[token("}")]
    #[punct(rbrace)]
    RBrace,

    #[token("[")]
    #[punct(lbracket)]
    LBracket,

    #[token("]")]
    #[punct(rbracket)]
    RBracket,
}

impl Kind {
    const KEYWORDS: [(&'static str, Kind); 2] = [("let", Kind::Let), ("in", Kind::In)];

    fn from_keyword(token: u16) -> Option<Kind> {
        Self::KEYWORDS
            .iter()
            .map(|(_, kind)| *kind)
            .find(|kind| *kind as u16 == token)
    }
}

/// Register the reserved words in `symbols`.
pub fn install_keywords<B>(symbols: &mut SymbolTable<B>) {
    for (text, kind) in Kind::KEYWORDS {
        symbols.insert(text, SymbolDescriptor::new(KEYWORD, kind as u16));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    None,
    Int(i64),
    Name(SymbolId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcToken {
    pub kind: Kind,
    pub span: Span,
    pub value: TokenValue,
}

impl Token for CalcToken {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.kind
    }

    fn location(&self) -> Location {
        self.span.begin()
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// Lex `buffer`, recording its lines as newlines go by.
///
/// `buffer` should come from [`Buffer::unindexed`]; its line map is built
/// here. Identifiers are interned in `symbols`.
pub fn lex<B>(
    buffer: &mut Buffer,
    symbols: &mut SymbolTable<B>,
) -> Result<Vec<CalcToken>, CalcError> {
    let mut tokens = Vec::new();
    let mut newlines = Vec::new();
    let mut failure: Option<(Location, Failure)> = None;

    let text = buffer.text();
    let mut lexer = Kind::lexer(text);
    while let Some(kind) = lexer.next() {
        let range = lexer.span();
        let span = Span::from(range.clone());
        let slice = lexer.slice();
        let (kind, value) = match kind {
            Ok(Kind::Newline) => {
                newlines.push(range);
                continue;
            }
            Ok(Kind::Number) => match slice.parse::<i64>() {
                Ok(n) => (Kind::Number, TokenValue::Int(n)),
                Err(_) => {
                    failure.get_or_insert((span.begin(), Failure::Number(slice.to_string())));
                    continue;
                }
            },
            Ok(Kind::Ident) => classify(symbols, slice),
            Ok(kind) => (kind, TokenValue::None),
            Err(()) => {
                failure.get_or_insert((span.begin(), Failure::Char(slice.to_string())));
                continue;
            }
        };
        tokens.push(CalcToken { kind, span, value });
    }

    record_lines(buffer, &newlines);
    log::debug!("lexed {} tokens over {} lines", tokens.len(), buffer.lines().len());

    match failure {
        None => Ok(tokens),
        Some((loc, Failure::Char(found))) => Err(CalcError::InvalidToken {
            at: Position::in_buffer(buffer, loc),
            found,
        }),
        Some((loc, Failure::Number(text))) => Err(CalcError::NumberTooLarge {
            at: Position::in_buffer(buffer, loc),
            text,
        }),
    }
}

enum Failure {
    Char(String),
    Number(String),
}

fn classify<B>(symbols: &mut SymbolTable<B>, text: &str) -> (Kind, TokenValue) {
    let id = symbols.insert(text, SymbolDescriptor::new(IDENTIFIER, Kind::Ident as u16));
    let descriptor = symbols.descriptor(id);
    if descriptor.kind == KEYWORD {
        if let Some(kind) = Kind::from_keyword(descriptor.token) {
            return (kind, TokenValue::None);
        }
    }
    (Kind::Ident, TokenValue::Name(id))
}

fn record_lines(buffer: &mut Buffer, newlines: &[std::ops::Range<usize>]) {
    let mut start = 0;
    buffer.start_line(start);
    for nl in newlines {
        buffer.finish_line(start, nl.start);
        start = nl.end;
        buffer.start_line(start);
    }
    let end = buffer.len();
    buffer.finish_line(start, end);
}
