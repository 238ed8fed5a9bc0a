//! Nested scopes for name resolution.
//!
//! Each scope carries its own variable/function/child lists plus a parent
//! index rather than an owning pointer, so the tree can be built top-down
//! while `scopes[0]` (the root) stays addressable by every later scope.

use awlc_util::{define_idx, Idx, IndexVec};

use crate::tfile::{FunId, VarId};

define_idx!(pub struct ScopeId);

pub struct Scope {
    pub parent: Option<ScopeId>,
    pub variables: Vec<VarId>,
    pub functions: Vec<FunId>,
    pub children: Vec<ScopeId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Self { parent, variables: Vec::new(), functions: Vec::new(), children: Vec::new() }
    }
}

/// The scope tree. `scopes[0]` is always the root; its parent is `None`.
pub struct ScopeTree {
    pub scopes: IndexVec<ScopeId, Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        scopes.push(Scope::new(None));
        Self { scopes }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::from_usize(0)
    }

    /// Creates a new scope as a child of `parent`.
    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        let child = self.scopes.push(Scope::new(Some(parent)));
        self.scopes[parent].children.push(child);
        child
    }

    pub fn add_variable(&mut self, scope: ScopeId, var: VarId) {
        self.scopes[scope].variables.push(var);
    }

    pub fn add_function(&mut self, scope: ScopeId, fun: FunId) {
        self.scopes[scope].functions.push(fun);
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_scope_has_no_parent() {
        let tree = ScopeTree::new();
        let root = tree.root();
        assert!(tree.scopes[root].parent.is_none());
    }

    #[test]
    fn child_scope_parent_chain_reaches_root() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let fn_scope = tree.enter(root);
        let block_scope = tree.enter(fn_scope);
        assert_eq!(tree.scopes[block_scope].parent, Some(fn_scope));
        assert_eq!(tree.scopes[fn_scope].parent, Some(root));
    }
}
