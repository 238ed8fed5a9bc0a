//! Recursive descent over the token stream.
//!
//! Single-token lookahead with an index cursor; every production consumes
//! exactly the tokens it recognises and fails with a source-located error
//! on mismatch.
//!
//! ```text
//! file       = { fun }
//! fun        = "fun" IDENT "(" [ variable { "," variable } ] ")" [ type ] block
//! variable   = IDENT type
//! type       = IDENT
//! block      = "{" { statement } "}"
//! statement  = "return" [ expression ] ";"
//! expression = INT_LITERAL | FLOAT_LITERAL
//! ```

use awlc_lex::{Token, TokenKind};
use awlc_util::{fatal_source, SourceFile, Span};

use crate::ast::{PBlock, PExpression, PFile, PFun, PStatement, PType, PVariable};
use crate::number::Number;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    file: &'a SourceFile,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, file: &'a SourceFile) -> Self {
        Self { tokens, pos: 0, file }
    }

    /// Parses the whole token stream: `file = { fun }`.
    pub fn parse_file(mut self) -> PFile {
        let mut funs = Vec::new();
        while !self.at(TokenKind::Eof) {
            funs.push(self.parse_fun());
        }
        PFile { funs }
    }

    fn parse_fun(&mut self) -> PFun {
        self.expect(TokenKind::KwFun, "expected 'fun'");
        let (name, name_span) = self.expect_identifier("expected function name");

        self.expect(TokenKind::LParen, "expected '(' after function name");
        let params = self.parse_params();
        self.expect(TokenKind::RParen, "expected ')' after parameter list");

        let return_type = if self.at(TokenKind::LBrace) { None } else { Some(self.parse_type()) };

        let body = self.parse_block();

        PFun { name, name_span, params, return_type, body }
    }

    /// Parameter list parsing runs a two-state machine so an empty slot
    /// between commas (`f(a u8, , b u8)`) is diagnosed rather than silently
    /// skipped, and so is a trailing comma (`f(a u8,)`).
    fn parse_params(&mut self) -> Vec<PVariable> {
        #[derive(PartialEq)]
        enum State {
            ExpectingName,
            HaveName,
        }

        let mut params = Vec::new();
        if self.at(TokenKind::RParen) {
            return params;
        }

        let mut state = State::ExpectingName;
        loop {
            match state {
                State::ExpectingName => {
                    let (name, name_span) = self.expect_identifier("expected parameter name");
                    let ty = self.parse_type();
                    params.push(PVariable { name, name_span, ty });
                    state = State::HaveName;
                }
                State::HaveName => {
                    if self.eat(TokenKind::Comma) {
                        if self.at(TokenKind::RParen) {
                            self.fatal_here("trailing comma in parameter list");
                        }
                        state = State::ExpectingName;
                    } else {
                        break;
                    }
                }
            }
        }
        params
    }

    fn parse_type(&mut self) -> PType {
        let (name, span) = self.expect_identifier("expected type name");
        PType { name, span }
    }

    fn parse_block(&mut self) -> PBlock {
        let start = self.current().span;
        self.expect(TokenKind::LBrace, "expected '{'");
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) {
            statements.push(self.parse_statement());
        }
        let end = self.current().span;
        self.expect(TokenKind::RBrace, "expected '}'");
        PBlock { statements, span: join(start, end) }
    }

    fn parse_statement(&mut self) -> PStatement {
        let start = self.current().span;
        self.expect(TokenKind::KwReturn, "expected 'return'");

        let expr = if self.at(TokenKind::Semicolon) { None } else { Some(self.parse_expression()) };

        let end = self.current().span;
        self.expect(TokenKind::Semicolon, "expected ';' after statement");
        PStatement::Return { expr, span: join(start, end) }
    }

    fn parse_expression(&mut self) -> PExpression {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::IntLiteral => {
                self.advance();
                let value: i128 = tok.content.parse().unwrap_or_else(|_| {
                    fatal_source(self.file, tok.span, format!("malformed integer literal '{}'", tok.content))
                });
                PExpression::NumberLiteral(Number::classify(value, tok.span))
            }
            TokenKind::FloatLiteral => {
                fatal_source(self.file, tok.span, "floating-point literals are not yet implemented")
            }
            _ => fatal_source(self.file, tok.span, "expected an expression"),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) {
        if !self.eat(kind) {
            self.fatal_here(message);
        }
    }

    fn expect_identifier(&mut self, message: &str) -> (String, Span) {
        let tok = self.current().clone();
        if tok.kind != TokenKind::Identifier {
            self.fatal_here(message);
        }
        self.advance();
        (tok.content, tok.span)
    }

    fn fatal_here(&self, message: &str) -> ! {
        let tok = self.current();
        fatal_source(self.file, tok.span, message)
    }
}

fn join(start: Span, end: Span) -> Span {
    Span::new(start.line, start.first, end.last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use awlc_lex::Lexer;

    fn parse(src: &str) -> (PFile, SourceFile) {
        let file = SourceFile::from_str("test.awl", src);
        let tokens = Lexer::new(&file).tokenize();
        let pfile = Parser::new(tokens, &file).parse_file();
        (pfile, file)
    }

    #[test]
    fn parses_minimal_function() {
        let (file, _src) = parse("fun main() { }");
        assert_eq!(file.funs.len(), 1);
        let f = &file.funs[0];
        assert_eq!(f.name, "main");
        assert!(f.params.is_empty());
        assert!(f.return_type.is_none());
        assert!(f.body.statements.is_empty());
    }

    #[test]
    fn parses_multiple_top_level_functions() {
        let (file, _src) = parse("fun f() { } fun g() { }");
        assert_eq!(file.funs.len(), 2);
        assert_eq!(file.funs[0].name, "f");
        assert_eq!(file.funs[1].name, "g");
    }

    #[test]
    fn parses_params_and_return_type() {
        let (file, _src) = parse("fun f(a u8, b s32) u64 { return 1; }");
        let f = &file.funs[0];
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].name, "a");
        assert_eq!(f.params[0].ty.name, "u8");
        assert_eq!(f.params[1].name, "b");
        assert_eq!(f.params[1].ty.name, "s32");
        assert_eq!(f.return_type.as_ref().unwrap().name, "u64");
    }

    #[test]
    fn return_with_no_expression_is_return_no_value() {
        let (file, _src) = parse("fun f() { return; }");
        match &file.funs[0].body.statements[0] {
            PStatement::Return { expr, .. } => assert!(expr.is_none()),
        }
    }

    #[test]
    fn return_with_literal_classifies_the_number() {
        let (file, _src) = parse("fun f() { return 42; }");
        match &file.funs[0].body.statements[0] {
            PStatement::Return { expr: Some(PExpression::NumberLiteral(n)), .. } => {
                assert_eq!(n.value, 42);
            }
            _ => panic!("expected a literal return"),
        }
    }
}
