//! Turns a loaded source file into a token stream.
//!
//! The grammar is small enough that the whole pipeline runs line by line
//! with a single-byte lookahead: no nested comment handling, no string
//! escapes, no Unicode identifier tables.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{keyword_kind, Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use awlc_util::SourceFile;

    fn tokenize(src: &str) -> Vec<Token> {
        let file = SourceFile::from_str("test.awl", src);
        Lexer::new(&file).tokenize()
    }

    #[test]
    fn lexes_minimal_function() {
        let tokens = tokenize("fun main() { }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwFun,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_params_and_return_type_and_statement() {
        let tokens = tokenize("fun f(a u8, b s32) -> { return 42; }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwFun,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::LBrace,
                TokenKind::KwReturn,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn classifies_float_literal_on_single_dot() {
        let tokens = tokenize("3.14");
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].content, "3.14");
    }

    #[test]
    fn eof_has_empty_content_and_zero_span() {
        let tokens = tokenize("");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.content, "");
        assert_eq!(eof.span.len(), 0);
    }

    #[test]
    fn resets_column_on_newline() {
        let tokens = tokenize("fun\nmain");
        assert_eq!(tokens[0].span.line, 0);
        assert_eq!(tokens[1].span.line, 1);
        assert_eq!(tokens[1].span.first, 0);
    }
}
