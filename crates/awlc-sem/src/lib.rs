//! Parse tree to typed tree: scope resolution, numeric-width checking, and
//! the `TFile` the code generator consumes.

mod analyser;
mod scope;
mod tfile;
mod types;

pub use analyser::Analyser;
pub use scope::{Scope, ScopeId, ScopeTree};
pub use tfile::{FunId, TBlock, TExpression, TFile, TFun, TStatement, TVariable, VarId};
pub use types::{Type, TypeId};
