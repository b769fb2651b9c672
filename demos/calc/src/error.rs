use core::fmt;

use frontkit::{Buffer, Location, input};
use thiserror::Error;

/// A line/column pair resolved from a [`Location`].
///
/// Line zero means the location could not be resolved and renders as
/// `?:?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn in_buffer(buffer: &Buffer, loc: Location) -> Self {
        let lines = buffer.lines();
        match lines.get(loc).zip(lines.column_of(loc)) {
            Some((line, column)) => Self {
                line: line.number(),
                column,
            },
            None => Self::default(),
        }
    }

    /// Resolve `loc` against the input currently being processed.
    pub fn current(loc: Location) -> Self {
        input::current_buffer().map_or_else(Self::default, |buffer| Self::in_buffer(&buffer, loc))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            f.write_str("?:?")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("{at}: unexpected character {found:?}")]
    InvalidToken { at: Position, found: String },

    #[error("{at}: number {text} does not fit in 64 bits")]
    NumberTooLarge { at: Position, text: String },

    #[error("{at}: expected {expected}")]
    Expected { at: Position, expected: String },

    #[error("syntax error")]
    Syntax,

    #[error("{at}: unbound name '{name}'")]
    Unbound { at: Position, name: String },

    #[error("{at}: expected {expected}, found {found}")]
    TypeMismatch {
        at: Position,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{at}: division by zero")]
    DivisionByZero { at: Position },

    #[error("{at}: arithmetic overflow")]
    Overflow { at: Position },

    #[error(transparent)]
    Limit(#[from] frontkit::Error),
}
