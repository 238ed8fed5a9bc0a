//! The token alphabet this lexer produces.

use awlc_util::Span;

/// The kind of a [`Token`].
///
/// `content` on the carrying [`Token`] is the exact lexeme bytes for
/// `Identifier`/`IntLiteral`/`FloatLiteral`, and the canonical spelling for
/// every fixed token (so `Arrow`'s content is always `"->"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    IntLiteral,
    FloatLiteral,
    KwFun,
    KwReturn,
    Arrow,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Eof,
}

/// A lexed token: its kind, its exact source text, and the span it occupies.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, span: Span) -> Self {
        Self { kind, content: content.into(), span }
    }
}

/// Looks up `word` in the keyword table, returning the matching keyword
/// kind if any.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    match word {
        "fun" => Some(TokenKind::KwFun),
        "return" => Some(TokenKind::KwReturn),
        _ => None,
    }
}
