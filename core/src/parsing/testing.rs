//! Shared fixtures for the combinator unit tests: a toy token set, a
//! hand-written lexer and a parser that renders s-expressions.

use super::{Grammar, Outcome, TokenCursor};
use crate::config::{ParseConfig, RecursionGuard};
use crate::source::{Buffer, Location};
use crate::traits::{Parser, Punctuation, Stream, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tok {
    Ident,
    Number,
    Plus,
    Minus,
    Star,
    Bang,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl TokenKind for Tok {
    fn spelling(&self) -> &'static str {
        match self {
            Tok::Ident => "identifier",
            Tok::Number => "number",
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Bang => "!",
            Tok::Comma => ",",
            Tok::LParen => "(",
            Tok::RParen => ")",
            Tok::LBrace => "{",
            Tok::RBrace => "}",
            Tok::LBracket => "[",
            Tok::RBracket => "]",
        }
    }
}

impl Punctuation for Tok {
    const COMMA: Self = Tok::Comma;
    const LPAREN: Self = Tok::LParen;
    const RPAREN: Self = Tok::RParen;
    const LBRACE: Self = Tok::LBrace;
    const RBRACE: Self = Tok::RBrace;
    const LBRACKET: Self = Tok::LBracket;
    const RBRACKET: Self = Tok::RBracket;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTok {
    pub kind: Tok,
    pub loc: Location,
    pub text: String,
}

impl Token for TestTok {
    type Kind = Tok;

    fn kind(&self) -> Tok {
        self.kind
    }

    fn location(&self) -> Location {
        self.loc
    }
}

pub type Cursor = TokenCursor<TestTok>;

pub fn lex(src: &str) -> Vec<TestTok> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let kind = match c {
            b' ' | b'\n' | b'\t' => {
                i += 1;
                continue;
            }
            b'a'..=b'z' | b'0'..=b'9' => {
                while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let kind = if c.is_ascii_digit() {
                    Tok::Number
                } else {
                    Tok::Ident
                };
                out.push(TestTok {
                    kind,
                    loc: Location::new(start),
                    text: src[start..i].to_string(),
                });
                continue;
            }
            b'+' => Tok::Plus,
            b'-' => Tok::Minus,
            b'*' => Tok::Star,
            b'!' => Tok::Bang,
            b',' => Tok::Comma,
            b'(' => Tok::LParen,
            b')' => Tok::RParen,
            b'{' => Tok::LBrace,
            b'}' => Tok::RBrace,
            b'[' => Tok::LBracket,
            b']' => Tok::RBracket,
            other => panic!("unexpected byte {:?} in test input", other as char),
        };
        i += 1;
        out.push(TestTok {
            kind,
            loc: Location::new(start),
            text: src[start..i].to_string(),
        });
    }
    out
}

pub fn cursor(src: &str) -> Cursor {
    let buffer = Buffer::new(src);
    TokenCursor::new(lex(src), buffer.end_location())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Atom,
    Operand,
    Item,
}

/// Renders every semantic action as an s-expression and records the
/// diagnostics it is asked to report.
pub struct TestParser {
    grammar: Grammar<Rule>,
    pub config: ParseConfig,
    pub depth: RecursionGuard,
    pub diagnostics: Vec<(Location, String)>,
    pub events: Vec<String>,
}

pub fn parser() -> TestParser {
    TestParser {
        grammar: Grammar::new()
            .with(Rule::Atom, "atom")
            .with(Rule::Item, "item"),
        config: ParseConfig::default(),
        depth: RecursionGuard::new(),
        diagnostics: Vec::new(),
        events: Vec::new(),
    }
}

impl TestParser {
    fn record(&mut self, event: String) -> Result<String, String> {
        self.events.push(event.clone());
        Ok(event)
    }
}

impl Parser<Cursor> for TestParser {
    type Output = String;
    type Error = String;
    type Rule = Rule;

    fn grammar(&self) -> &Grammar<Rule> {
        &self.grammar
    }

    fn on_sequence(&mut self, elements: Vec<String>) -> Result<String, String> {
        self.record(format!("(seq{})", join(&elements)))
    }

    fn on_list(&mut self, elements: Vec<String>) -> Result<String, String> {
        self.record(format!("(list{})", join(&elements)))
    }

    fn on_enclosure(
        &mut self,
        open: TestTok,
        close: TestTok,
        inner: Option<String>,
    ) -> Result<String, String> {
        let inner = inner.map(|i| format!(" {}", i)).unwrap_or_default();
        self.record(format!("({}{}{})", open.text, inner, close.text))
    }

    fn on_prefix(&mut self, op: TestTok, operand: String) -> Result<String, String> {
        self.record(format!("({} {})", op.text, operand))
    }

    fn on_infix(&mut self, op: TestTok, lhs: String, rhs: String) -> Result<String, String> {
        if op.kind == Tok::Star && rhs == "0" {
            return Err("multiplied by zero".to_string());
        }
        self.record(format!("({} {} {})", op.text, lhs, rhs))
    }

    fn on_expected(&mut self, location: Location, expected: &str) -> String {
        self.diagnostics.push((location, expected.to_string()));
        format!("expected {}", expected)
    }

    fn on_error(&mut self) -> String {
        "error".to_string()
    }

    fn enter_nested(&mut self) -> Result<(), String> {
        self.depth
            .enter(self.config.max_recursion_depth)
            .map_err(|err| err.to_string())
    }

    fn exit_nested(&mut self) {
        self.depth.exit();
    }
}

fn join(elements: &[String]) -> String {
    elements.iter().map(|e| format!(" {}", e)).collect()
}

/// atom ::= identifier | number. A `!` is a committed failure.
pub fn atom(p: &mut TestParser, s: &mut Cursor) -> Outcome<String, String> {
    match s.peek_kind() {
        Some(Tok::Ident) | Some(Tok::Number) => match s.next() {
            Some(tok) => Outcome::Match(tok.text),
            None => Outcome::NoMatch,
        },
        Some(Tok::Bang) => {
            s.next();
            Outcome::Error(p.on_error())
        }
        _ => Outcome::NoMatch,
    }
}
