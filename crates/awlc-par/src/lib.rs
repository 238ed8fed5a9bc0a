//! Token stream to parse tree.
//!
//! The grammar has exactly one declaration form, one statement form, and
//! one expression form, so the parser is a handful of mutually recursive
//! functions rather than a generic precedence-climbing engine.

mod ast;
mod number;
mod parser;

pub use ast::{PBlock, PExpression, PFile, PFun, PStatement, PType, PVariable};
pub use number::{Number, Width};
pub use parser::Parser;
