//! The typed tree (T-nodes) and the `TFile` aggregate the analyser produces.

use awlc_par::Number;
use awlc_util::{define_idx, IndexVec};

use crate::scope::ScopeId;
use crate::types::TypeId;

define_idx!(pub struct VarId);
define_idx!(pub struct FunId);

/// `(identifier, type_index)`.
pub struct TVariable {
    pub name: String,
    pub ty: TypeId,
}

/// An expression. Mirrors `PExpression` but no longer needs to — the
/// literal is already fully classified by the parser, so the analyser's
/// job is just to check it against the expected type, not to re-derive it.
#[derive(Clone, Copy, Debug)]
pub enum TExpression {
    NumberLiteral(Number),
}

/// A statement. Mirrors `PStatement`.
pub enum TStatement {
    Return { expr: Option<TExpression> },
}

/// A brace-delimited block: its own scope plus an ordered statement list.
pub struct TBlock {
    pub scope: ScopeId,
    pub statements: Vec<TStatement>,
}

/// `(scope_index, identifier, return_type_index, TBlock)`.
pub struct TFun {
    pub scope: ScopeId,
    pub name: String,
    pub return_type: TypeId,
    pub body: TBlock,
}

/// The complete typed representation of one source file: four arena-style
/// tables addressed by stable index, plus the scope tree name resolution
/// walks.
pub struct TFile {
    pub types: IndexVec<TypeId, crate::types::Type>,
    pub scopes: crate::scope::ScopeTree,
    pub variables: IndexVec<VarId, TVariable>,
    pub funs: IndexVec<FunId, TFun>,
}
