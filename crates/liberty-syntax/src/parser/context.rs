//! Token-stream cursor used by the recursive-descent parser.
//!
//! Shaped after `rhai-rowan`'s `Context` (a cursor object exposing
//! `token`/`eat`/error-collection methods over the lexer), but driving plain
//! token indices instead of a green-tree builder, since the parser here
//! builds owned [`crate::cst::Node`]s directly.

use tracing::trace;

use crate::token::{Token, TokenKind};

use super::ParserError;

pub struct Context {
    tokens: Vec<Token>,
    pos: usize,
}

impl Context {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    #[must_use]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            trace!(pos = self.pos, "advance");
            self.pos += 1;
        }
        tok
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes and returns the current token if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Like [`Self::eat`], but raises a [`ParserError`] when the token is absent.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParserError> {
        self.eat(kind).ok_or_else(|| self.error(what))
    }

    /// Looks ahead, starting one past `open_idx` (assumed to hold a
    /// `GROUP_OPEN`), for its matching `GROUP_CLOSE`, tracking paren depth.
    /// Bounded: never descends past a brace token (§4.2.3).
    #[must_use]
    pub fn find_matching_close(&self, open_idx: usize) -> Option<usize> {
        let mut depth = 1i32;
        let mut i = open_idx + 1;
        while let Some(tok) = self.tokens.get(i) {
            match tok.kind {
                TokenKind::GroupOpen => depth += 1,
                TokenKind::GroupClose => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn token_at(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    /// The line/column to report for an error at the current cursor
    /// position: the current token's position, or one past the last token
    /// at end of input.
    #[must_use]
    pub fn error_position(&self) -> (u32, u32) {
        if let Some(tok) = self.peek() {
            (tok.line, tok.column)
        } else if let Some(last) = self.tokens.last() {
            (last.line, last.column + last.lexeme.chars().count() as u32)
        } else {
            (1, 1)
        }
    }

    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> ParserError {
        let (line, column) = self.error_position();
        ParserError {
            message: message.into(),
            line,
            column,
        }
    }
}
