use core::fmt;

use frontkit::{Location, SymbolId, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// A parsed expression. `at` is where diagnostics about the node point:
/// the operator for unary and binary nodes, the opening token otherwise.
///
/// Composite nodes carry their nesting `height`; build them through the
/// constructors on [`Expr`] so it stays in step with the children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Int {
        value: i64,
        at: Location,
    },
    Var {
        name: SymbolId,
        at: Location,
    },
    Unary {
        op: UnOp,
        at: Location,
        operand: Box<Expr>,
        height: usize,
    },
    Binary {
        op: BinOp,
        at: Location,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        height: usize,
    },
    List {
        items: Vec<Expr>,
        at: Location,
        height: usize,
    },
    Block {
        exprs: Vec<Expr>,
        at: Location,
        height: usize,
    },
    Let {
        name: SymbolId,
        at: Location,
        value: Box<Expr>,
        body: Box<Expr>,
        height: usize,
    },
}

impl Expr {
    pub fn unary(op: UnOp, at: Location, operand: Expr) -> Self {
        Expr::Unary {
            op,
            at,
            height: above([&operand]),
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, at: Location, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            at,
            height: above([&lhs, &rhs]),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn list(items: Vec<Expr>, at: Location) -> Self {
        Expr::List {
            height: above(&items),
            items,
            at,
        }
    }

    pub fn block(exprs: Vec<Expr>, at: Location) -> Self {
        Expr::Block {
            height: above(&exprs),
            exprs,
            at,
        }
    }

    pub fn let_in(name: SymbolId, at: Location, value: Expr, body: Expr) -> Self {
        Expr::Let {
            name,
            at,
            height: above([&value, &body]),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    /// Nesting depth of the tree: zero for literals and names, one more
    /// than the deepest child otherwise.
    pub fn height(&self) -> usize {
        match self {
            Expr::Int { .. } | Expr::Var { .. } => 0,
            Expr::Unary { height, .. }
            | Expr::Binary { height, .. }
            | Expr::List { height, .. }
            | Expr::Block { height, .. }
            | Expr::Let { height, .. } => *height,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Expr::Int { at, .. }
            | Expr::Var { at, .. }
            | Expr::Unary { at, .. }
            | Expr::Binary { at, .. }
            | Expr::List { at, .. }
            | Expr::Block { at, .. }
            | Expr::Let { at, .. } => *at,
        }
    }

    /// Render as an s-expression, resolving names through `symbols`.
    pub fn sexp<'a, B>(&'a self, symbols: &'a SymbolTable<B>) -> Sexp<'a, B> {
        Sexp {
            expr: self,
            symbols,
        }
    }
}

fn above<'a>(children: impl IntoIterator<Item = &'a Expr>) -> usize {
    children
        .into_iter()
        .map(Expr::height)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

pub struct Sexp<'a, B> {
    expr: &'a Expr,
    symbols: &'a SymbolTable<B>,
}

impl<B> Sexp<'_, B> {
    fn write_all(&self, f: &mut fmt::Formatter<'_>, head: &str, exprs: &[Expr]) -> fmt::Result {
        write!(f, "({}", head)?;
        for e in exprs {
            write!(f, " {}", e.sexp(self.symbols))?;
        }
        f.write_str(")")
    }
}

impl<B> fmt::Display for Sexp<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.symbols;
        match self.expr {
            Expr::Int { value, .. } => write!(f, "{}", value),
            Expr::Var { name, .. } => f.write_str(symbols.text(*name)),
            Expr::Unary { op, operand, .. } => {
                write!(f, "({} {})", op.symbol(), operand.sexp(symbols))
            }
            Expr::Binary { op, lhs, rhs, .. } => write!(
                f,
                "({} {} {})",
                op.symbol(),
                lhs.sexp(symbols),
                rhs.sexp(symbols)
            ),
            Expr::List { items, .. } => self.write_all(f, "list", items),
            Expr::Block { exprs, .. } => self.write_all(f, "block", exprs),
            Expr::Let {
                name, value, body, ..
            } => write!(
                f,
                "(let {} {} {})",
                symbols.text(*name),
                value.sexp(symbols),
                body.sexp(symbols)
            ),
        }
    }
}
