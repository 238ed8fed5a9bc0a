//! Parse tree (P-nodes).
//!
//! Every node carries enough of the source tokens to let the analyser
//! re-derive names and spans without holding onto the token stream itself.

use awlc_util::Span;

use crate::number::Number;

/// A named primitive type, e.g. `u32`.
#[derive(Clone, Debug, PartialEq)]
pub struct PType {
    pub name: String,
    pub span: Span,
}

/// A function parameter: `name type`.
#[derive(Clone, Debug, PartialEq)]
pub struct PVariable {
    pub name: String,
    pub name_span: Span,
    pub ty: PType,
}

/// An expression. The language's only expression form is a numeric literal.
#[derive(Clone, Debug, PartialEq)]
pub enum PExpression {
    NumberLiteral(Number),
}

impl PExpression {
    pub fn span(&self) -> Span {
        match self {
            PExpression::NumberLiteral(n) => n.span,
        }
    }
}

/// A statement. The language's only statement form is `return`.
#[derive(Clone, Debug, PartialEq)]
pub enum PStatement {
    Return { expr: Option<PExpression>, span: Span },
}

/// A brace-delimited, ordered sequence of statements.
#[derive(Clone, Debug, PartialEq)]
pub struct PBlock {
    pub statements: Vec<PStatement>,
    pub span: Span,
}

/// A top-level function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct PFun {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<PVariable>,
    pub return_type: Option<PType>,
    pub body: PBlock,
}

/// The whole parsed source file: an ordered sequence of functions.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PFile {
    pub funs: Vec<PFun>,
}
