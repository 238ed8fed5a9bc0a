//! Parse tree to typed tree.
//!
//! Builds the `TFile`'s four tables in one walk: the primitive type table
//! is pre-populated before anything else runs, the root scope exists from
//! the first function, and every later function's parameters and block
//! nest a fresh scope under it.

use awlc_par::{PBlock, PExpression, PFile, PFun, PStatement, PType};
use awlc_util::{fatal_source, SourceFile};

use crate::scope::{ScopeId, ScopeTree};
use crate::tfile::{FunId, TBlock, TExpression, TFile, TFun, TStatement, TVariable, VarId};
use crate::types::{self, Type, TypeId};

pub struct Analyser<'a> {
    file: &'a SourceFile,
    types: awlc_util::IndexVec<TypeId, Type>,
    scopes: ScopeTree,
    variables: awlc_util::IndexVec<VarId, TVariable>,
    funs: awlc_util::IndexVec<FunId, TFun>,
    u0: TypeId,
}

impl<'a> Analyser<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        let (types, u0) = types::build_primitives();
        Self { file, types, scopes: ScopeTree::new(), variables: awlc_util::IndexVec::new(), funs: awlc_util::IndexVec::new(), u0 }
    }

    /// Walks `pfile`, populating the four tables, and returns the finished
    /// `TFile`.
    pub fn analyse(mut self, pfile: PFile) -> TFile {
        let root = self.scopes.root();

        for pfun in &pfile.funs {
            if self.scopes.scopes[root].functions.iter().any(|&id| self.funs[id].name == pfun.name) {
                fatal_source(self.file, pfun.name_span, format!("redefinition of function '{}'", pfun.name));
            }
            let tfun = self.check_fun(root, pfun);
            let fun_id = self.funs.push(tfun);
            self.scopes.add_function(root, fun_id);
        }

        TFile { types: self.types, scopes: self.scopes, variables: self.variables, funs: self.funs }
    }

    fn resolve_type(&self, pty: &PType) -> TypeId {
        types::find_type_name(&self.types, &pty.name)
            .unwrap_or_else(|| fatal_source(self.file, pty.span, format!("unknown typename '{}'", pty.name)))
    }

    fn check_fun(&mut self, parent: ScopeId, pfun: &PFun) -> TFun {
        let fn_scope = self.scopes.enter(parent);

        for param in &pfun.params {
            if self.scopes.scopes[fn_scope].variables.iter().any(|&id| self.variables[id].name == param.name) {
                fatal_source(self.file, param.name_span, format!("redefinition of variable '{}'", param.name));
            }
            let ty = self.resolve_type(&param.ty);
            let var_id = self.variables.push(TVariable { name: param.name.clone(), ty });
            self.scopes.add_variable(fn_scope, var_id);
        }

        let return_type = match &pfun.return_type {
            Some(pty) => self.resolve_type(pty),
            None => self.u0,
        };

        let body = self.check_block(fn_scope, &pfun.body, return_type);

        TFun { scope: fn_scope, name: pfun.name.clone(), return_type, body }
    }

    fn check_block(&mut self, parent: ScopeId, pblock: &PBlock, return_type: TypeId) -> TBlock {
        let block_scope = self.scopes.enter(parent);
        let statements = pblock.statements.iter().map(|s| self.check_statement(s, return_type)).collect();
        TBlock { scope: block_scope, statements }
    }

    fn check_statement(&mut self, pstmt: &PStatement, return_type: TypeId) -> TStatement {
        match pstmt {
            PStatement::Return { expr, .. } => {
                let expr = expr.as_ref().map(|e| self.check_expression(e, return_type));
                TStatement::Return { expr }
            }
        }
    }

    fn check_expression(&self, pexpr: &PExpression, expected_type: TypeId) -> TExpression {
        match pexpr {
            PExpression::NumberLiteral(number) => {
                let expected_bits = 8 * self.types[expected_type].byte_size;
                let literal_bits = number.width.bits();
                if literal_bits > expected_bits {
                    fatal_source(
                        self.file,
                        pexpr.span(),
                        format!("size mismatch; expected {} bits but got {} bits", expected_bits, literal_bits),
                    );
                }
                TExpression::NumberLiteral(*number)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awlc_lex::Lexer;
    use awlc_par::Parser;

    fn analyse(src: &str) -> (TFile, SourceFile) {
        let file = SourceFile::from_str("test.awl", src);
        let tokens = Lexer::new(&file).tokenize();
        let pfile = Parser::new(tokens, &file).parse_file();
        let tfile = Analyser::new(&file).analyse(pfile);
        (tfile, file)
    }

    #[test]
    fn minimal_function_defaults_to_u0_return() {
        let (tfile, _f) = analyse("fun main() { }");
        assert_eq!(tfile.funs.len(), 1);
        let main = tfile.funs.iter().next().unwrap();
        assert_eq!(tfile.types[main.return_type].name, "u0");
    }

    #[test]
    fn params_are_bound_in_the_function_scope() {
        let (tfile, _f) = analyse("fun f(a u8, b s32) { }");
        let f = tfile.funs.iter().next().unwrap();
        assert_eq!(tfile.scopes.scopes[f.scope].variables.len(), 2);
    }

    #[test]
    fn literal_within_width_is_accepted() {
        let (tfile, _f) = analyse("fun main() s32 { return 42; }");
        let main = tfile.funs.iter().next().unwrap();
        assert_eq!(main.body.statements.len(), 1);
    }

    #[test]
    fn block_scope_nests_under_function_scope() {
        let (tfile, _f) = analyse("fun main() { }");
        let main = tfile.funs.iter().next().unwrap();
        assert_eq!(tfile.scopes.scopes[main.body.scope].parent, Some(main.scope));
    }
}
