//! Byte stream to token stream.
//!
//! Operates line by line, resetting the column cursor at each newline, and
//! dispatches on the current byte: whitespace is skipped, a letter starts an
//! identifier-or-keyword run, a digit starts a numeric literal, and anything
//! else is looked up in the fixed operator table.

use awlc_util::{fatal_source, SourceFile, Span};

use crate::cursor::Cursor;
use crate::token::{keyword_kind, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: &'a SourceFile,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        let source = file.source();
        Self { cursor: Cursor::new(source), file }
    }

    /// Lexes the whole input into a token stream ending in a single `Eof`
    /// sentinel with an empty, zero-length span.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return tokens;
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.cursor.line();
        let start_col = self.cursor.column();
        let start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token::new(TokenKind::Eof, "", Span::new(line, start_col, start_col));
        }

        let c = self.cursor.current();
        if c.is_ascii_alphabetic() {
            return self.lex_word(line, start_col, start);
        }
        if c.is_ascii_digit() {
            return self.lex_number(line, start_col, start);
        }
        self.lex_operator(line, start_col, start)
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current().is_ascii_whitespace() {
            self.cursor.advance();
        }
    }

    fn lex_word(&mut self, line: u32, start_col: u32, start: usize) -> Token {
        while self.cursor.current().is_ascii_alphanumeric() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let span = Span::new(line, start_col, self.cursor.column());
        match keyword_kind(text) {
            Some(kind) => Token::new(kind, text, span),
            None => Token::new(TokenKind::Identifier, text, span),
        }
    }

    fn lex_number(&mut self, line: u32, start_col: u32, start: usize) -> Token {
        let mut saw_dot = false;
        loop {
            let c = self.cursor.current();
            if c.is_ascii_digit() {
                self.cursor.advance();
            } else if c == '.' {
                if saw_dot {
                    let span = Span::new(line, start_col, self.cursor.column() + 1);
                    fatal_source(self.file, span, "malformed number literal: multiple '.'");
                }
                saw_dot = true;
                self.cursor.advance();
            } else {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        let span = Span::new(line, start_col, self.cursor.column());
        let kind = if saw_dot { TokenKind::FloatLiteral } else { TokenKind::IntLiteral };
        Token::new(kind, text, span)
    }

    fn lex_operator(&mut self, line: u32, start_col: u32, start: usize) -> Token {
        let c = self.cursor.current();
        let kind = match c {
            '(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            ')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            '{' => {
                self.cursor.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.cursor.advance();
                TokenKind::RBrace
            }
            ';' => {
                self.cursor.advance();
                TokenKind::Semicolon
            }
            ',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            '-' if self.cursor.peek(1) == '>' => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::Arrow
            }
            _ => {
                let span = Span::new(line, start_col, start_col + 1);
                fatal_source(self.file, span, format!("unexpected character '{}'", c));
            }
        };
        let text = self.cursor.slice_from(start);
        let span = Span::new(line, start_col, self.cursor.column());
        Token::new(kind, text, span)
    }
}
