//! The calc grammar.
//!
//! ```text
//! program  ::= expr <end of input>
//! expr     ::= 'let' identifier '=' expr 'in' expr | additive
//! additive ::= term (('+' | '-') term)*
//! term     ::= factor (('*' | '/') factor)*
//! factor   ::= ('-' | '!')* primary
//! primary  ::= number | identifier
//!            | '(' expr ')'
//!            | '[' [expr (',' expr)*] ']'
//!            | '{' expr* '}'
//! ```

use frontkit::{
    Grammar, GrammarRule, Location, Outcome, Parser, Stream, Token, TokenCursor, expect_token,
    match_if, match_token, parse_brace_enclosed, parse_bracket_enclosed, parse_expected, parse_left_infix,
    parse_list, parse_paren_enclosed, parse_prefix, parse_sequence, rule, try_outcome,
};

use crate::Calc;
use crate::ast::{BinOp, Expr, UnOp};
use crate::error::{CalcError, Position};
use crate::lexer::{CalcToken, Kind, TokenValue};

pub type Cursor = TokenCursor<CalcToken>;

type Parsed = Outcome<Expr, CalcError>;

/// Rule identifiers of the calc grammar.
#[derive(GrammarRule, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    #[name("expression")]
    Expr,
    Term,
    Factor,
    #[name("operand")]
    Primary,
    #[name("list element")]
    Element,
    Block,
}

pub fn program(p: &mut Calc, s: &mut Cursor) -> Parsed {
    let value = try_outcome!(parse_expected(p, s, rule(Rule::Expr, expr)));
    if s.is_eof() {
        Outcome::Match(value)
    } else {
        Outcome::Error(p.on_expected(s.location(), "end of input"))
    }
}

pub fn expr(p: &mut Calc, s: &mut Cursor) -> Parsed {
    match match_token(s, Kind::Let) {
        Some(kw) => let_expr(p, s, kw),
        None => additive(p, s),
    }
}

/// `let` bodies recurse through [`expr`], so each one counts as a
/// nesting level.
fn let_expr(p: &mut Calc, s: &mut Cursor, kw: CalcToken) -> Parsed {
    if let Err(err) = p.enter_nested() {
        return Outcome::Error(err);
    }
    let out = let_binding(p, s, kw);
    p.exit_nested();
    out
}

fn let_binding(p: &mut Calc, s: &mut Cursor, kw: CalcToken) -> Parsed {
    let name = try_outcome!(expect_token(p, s, Kind::Ident));
    try_outcome!(expect_token(p, s, Kind::Assign));
    let value = try_outcome!(parse_expected(p, s, rule(Rule::Expr, expr)));
    try_outcome!(expect_token(p, s, Kind::In));
    let body = try_outcome!(parse_expected(p, s, rule(Rule::Expr, expr)));

    let TokenValue::Name(name) = name.value else {
        return Outcome::Error(p.on_error());
    };
    p.bounded(Expr::let_in(name, kw.location(), value, body)).into()
}

fn additive(p: &mut Calc, s: &mut Cursor) -> Parsed {
    parse_left_infix(p, s, &[Kind::Plus, Kind::Minus], rule(Rule::Term, term))
}

fn term(p: &mut Calc, s: &mut Cursor) -> Parsed {
    parse_left_infix(p, s, &[Kind::Star, Kind::Slash], rule(Rule::Factor, factor))
}

fn factor(p: &mut Calc, s: &mut Cursor) -> Parsed {
    parse_prefix(p, s, &[Kind::Minus, Kind::Bang], rule(Rule::Primary, primary))
}

fn primary(p: &mut Calc, s: &mut Cursor) -> Parsed {
    atom(p, s)
        .or_else(|| parse_paren_enclosed(p, s, rule(Rule::Expr, expr)))
        .or_else(|| parse_bracket_enclosed(p, s, rule(Rule::Element, elements)))
        .or_else(|| parse_brace_enclosed(p, s, rule(Rule::Block, block)))
}

fn atom(p: &mut Calc, s: &mut Cursor) -> Parsed {
    let Some(tok) = match_if(s, |t| matches!(t.kind, Kind::Number | Kind::Ident)) else {
        return Outcome::NoMatch;
    };
    let at = tok.location();
    match tok.value {
        TokenValue::Int(value) => Outcome::Match(Expr::Int { value, at }),
        TokenValue::Name(name) => Outcome::Match(Expr::Var { name, at }),
        TokenValue::None => Outcome::Error(p.on_error()),
    }
}

fn elements(p: &mut Calc, s: &mut Cursor) -> Parsed {
    parse_list(p, s, rule(Rule::Expr, expr), "list element")
}

fn block(p: &mut Calc, s: &mut Cursor) -> Parsed {
    parse_sequence(p, s, rule(Rule::Expr, expr))
}

impl Calc {
    /// Reject trees nested deeper than the recursion limit. Operator
    /// chains are parsed iteratively, so the guard around enclosures
    /// alone does not bound the tree the evaluator walks.
    fn bounded(&self, expr: Expr) -> Result<Expr, CalcError> {
        let depth = expr.height();
        let limit = self.config.max_recursion_depth;
        if depth > limit {
            log::debug!("expression nested {} deep, limit {}", depth, limit);
            return Err(frontkit::Error::RecursionLimitExceeded { depth, limit }.into());
        }
        Ok(expr)
    }
}

impl Parser<Cursor> for Calc {
    type Output = Expr;
    type Error = CalcError;
    type Rule = Rule;

    fn grammar(&self) -> &Grammar<Rule> {
        &self.grammar
    }

    fn on_sequence(&mut self, exprs: Vec<Expr>) -> Result<Expr, CalcError> {
        self.bounded(Expr::block(exprs, Location::NONE))
    }

    fn on_list(&mut self, items: Vec<Expr>) -> Result<Expr, CalcError> {
        self.bounded(Expr::list(items, Location::NONE))
    }

    fn on_enclosure(
        &mut self,
        open: CalcToken,
        close: CalcToken,
        inner: Option<Expr>,
    ) -> Result<Expr, CalcError> {
        let at = open.location();
        match (open.kind, inner) {
            (Kind::LParen, None) => Err(self.on_expected(close.location(), "expression")),
            (Kind::LBracket, None) => Ok(Expr::list(Vec::new(), at)),
            (Kind::LBracket, Some(Expr::List { items, .. })) => Ok(Expr::list(items, at)),
            (Kind::LBrace, None) => Ok(Expr::block(Vec::new(), at)),
            (Kind::LBrace, Some(Expr::Block { exprs, .. })) => Ok(Expr::block(exprs, at)),
            (_, Some(expr)) => Ok(expr),
            (_, None) => Err(self.on_error()),
        }
    }

    fn on_prefix(&mut self, op: CalcToken, operand: Expr) -> Result<Expr, CalcError> {
        let unary = match op.kind {
            Kind::Minus => UnOp::Neg,
            Kind::Bang => UnOp::Not,
            _ => return Err(self.on_error()),
        };
        self.bounded(Expr::unary(unary, op.location(), operand))
    }

    fn on_infix(&mut self, op: CalcToken, lhs: Expr, rhs: Expr) -> Result<Expr, CalcError> {
        let binary = match op.kind {
            Kind::Plus => BinOp::Add,
            Kind::Minus => BinOp::Sub,
            Kind::Star => BinOp::Mul,
            Kind::Slash => BinOp::Div,
            _ => return Err(self.on_error()),
        };
        self.bounded(Expr::binary(binary, op.location(), lhs, rhs))
    }

    fn on_expected(&mut self, location: Location, expected: &str) -> CalcError {
        let err = CalcError::Expected {
            at: Position::current(location),
            expected: expected.to_string(),
        };
        log::debug!("{}", err);
        self.diagnostics.push(err.clone());
        err
    }

    fn on_error(&mut self) -> CalcError {
        CalcError::Syntax
    }

    fn enter_nested(&mut self) -> Result<(), CalcError> {
        Ok(self.depth.enter(self.config.max_recursion_depth)?)
    }

    fn exit_nested(&mut self) {
        self.depth.exit();
    }
}
