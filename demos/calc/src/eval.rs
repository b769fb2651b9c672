use core::fmt;

use frontkit::{Location, SymbolTable};

use crate::ast::{BinOp, Expr, UnOp};
use crate::error::{CalcError, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::List(_) => "list",
        }
    }

    fn as_int(&self, at: Location) -> Result<i64, CalcError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(CalcError::TypeMismatch {
                at: Position::current(at),
                expected: "integer",
                found: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Evaluate `expr`, resolving names through the binding stacks of
/// `symbols`.
///
/// Each `let` binds its name for the duration of its body only; the
/// binding is removed again on every exit path.
pub fn eval(expr: &Expr, symbols: &mut SymbolTable<Value>) -> Result<Value, CalcError> {
    match expr {
        Expr::Int { value, .. } => Ok(Value::Int(*value)),
        Expr::Var { name, at } => match symbols.get_binding(*name) {
            Some(value) => Ok(value.clone()),
            None => Err(CalcError::Unbound {
                at: Position::current(*at),
                name: symbols.text(*name).to_string(),
            }),
        },
        Expr::Unary { op, at, operand, .. } => {
            let n = eval(operand, symbols)?.as_int(*at)?;
            match op {
                UnOp::Neg => n.checked_neg().map(Value::Int).ok_or(CalcError::Overflow {
                    at: Position::current(*at),
                }),
                UnOp::Not => Ok(Value::Int(i64::from(n == 0))),
            }
        }
        Expr::Binary {
            op, at, lhs, rhs, ..
        } => {
            let lhs = eval(lhs, symbols)?;
            let rhs = eval(rhs, symbols)?;
            binary(*op, *at, lhs, rhs)
        }
        Expr::List { items, .. } => items
            .iter()
            .map(|item| eval(item, symbols))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Expr::Block { exprs, .. } => {
            let mut last = Value::List(Vec::new());
            for e in exprs {
                last = eval(e, symbols)?;
            }
            Ok(last)
        }
        Expr::Let {
            name, value, body, ..
        } => {
            let value = eval(value, symbols)?;
            let mut scope = symbols.bind(*name, value);
            eval(body, &mut scope)
        }
    }
}

fn binary(op: BinOp, at: Location, lhs: Value, rhs: Value) -> Result<Value, CalcError> {
    let (a, b) = match (op, lhs, rhs) {
        (BinOp::Add, Value::List(mut front), Value::List(back)) => {
            front.extend(back);
            return Ok(Value::List(front));
        }
        (_, lhs, rhs) => (lhs.as_int(at)?, rhs.as_int(at)?),
    };
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div if b == 0 => {
            return Err(CalcError::DivisionByZero {
                at: Position::current(at),
            });
        }
        BinOp::Div => a.checked_div(b),
    };
    result.map(Value::Int).ok_or(CalcError::Overflow {
        at: Position::current(at),
    })
}
