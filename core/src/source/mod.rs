//! Source positions and line tracking.
//!
//! A [`Buffer`] owns source text and a [`LineMap`] from starting offsets to
//! [`Line`]s. Lexers and parsers deal in plain [`Location`]s and [`Span`]s;
//! the buffer turns them back into line/column pairs and source snippets
//! when a diagnostic is rendered.

mod buffer;
mod line;
mod location;

pub use buffer::{BoundLocation, BoundSpan, Buffer};
pub use line::{Line, LineMap};
pub use location::{Location, Span};
