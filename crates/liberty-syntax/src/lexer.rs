//! The Liberty lexer: a single left-to-right scan producing [`Token`]s.
//!
//! This mirrors the shape of a hand-written tokenizer wrapper (see
//! `rhai-rowan`'s `Lexer<'source>`), but scans the dialect rules of the
//! Liberty format directly instead of delegating to a generated lexer, since
//! the CST needs owned, mutable token lists that a generated lexer's
//! zero-copy spans don't give us.

use thiserror::Error;

use crate::token::{Token, TokenKind};

const PUNCTUATION: &[char] = &['(', ')', '{', '}', ':', ';', ','];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("unterminated string literal starting at {line}:{column}")]
    UnterminatedString { line: u32, column: u32 },
    #[error("unterminated block comment starting at {line}:{column}")]
    UnterminatedBlockComment { line: u32, column: u32 },
}

/// Scans `source` into a flat token stream.
pub struct Lexer<'src> {
    source: &'src [u8],
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let _ = self.source;
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            let start_line = self.line;
            let start_column = self.column;

            if c == '\\' && self.peek_at(1) == Some('\n') {
                self.advance();
                self.advance();
                tokens.push(Token::new(
                    TokenKind::EscNewline,
                    "\\\n",
                    start_line,
                    start_column,
                ));
                continue;
            }

            if c.is_whitespace() {
                self.advance();
                continue;
            }

            if c == '/' && self.peek_at(1) == Some('/') {
                let lexeme = self.scan_line_comment();
                tokens.push(Token::new(TokenKind::Comment, lexeme, start_line, start_column));
                continue;
            }

            if c == '/' && self.peek_at(1) == Some('*') {
                let lexeme = self.scan_block_comment(start_line, start_column)?;
                tokens.push(Token::new(TokenKind::Comment, lexeme, start_line, start_column));
                continue;
            }

            if c == '"' {
                let lexeme = self.scan_string(start_line, start_column)?;
                tokens.push(Token::new(TokenKind::String, lexeme, start_line, start_column));
                continue;
            }

            if let Some(kind) = single_char_kind(c) {
                self.advance();
                tokens.push(Token::new(kind, c.to_string(), start_line, start_column));
                continue;
            }

            let lexeme = self.scan_ident();
            tokens.push(Token::new(TokenKind::Ident, lexeme, start_line, start_column));
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn scan_line_comment(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            out.push(c);
            self.advance();
        }
        out
    }

    fn scan_block_comment(&mut self, line: u32, column: u32) -> Result<String, LexerError> {
        let mut out = String::new();
        out.push(self.advance().unwrap()); // '/'
        out.push(self.advance().unwrap()); // '*'

        loop {
            match self.peek() {
                None => return Err(LexerError::UnterminatedBlockComment { line, column }),
                Some('*') if self.peek_at(1) == Some('/') => {
                    out.push(self.advance().unwrap());
                    out.push(self.advance().unwrap());
                    break;
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }

        Ok(out)
    }

    fn scan_string(&mut self, line: u32, column: u32) -> Result<String, LexerError> {
        self.advance(); // opening quote
        let mut out = String::new();

        loop {
            match self.peek() {
                None => return Err(LexerError::UnterminatedString { line, column }),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') if self.peek_at(1) == Some('\n') => {
                    // Line continuation inside a string: kept literally in
                    // the decoded body (§4.1 rule 5, P1).
                    out.push('\\');
                    out.push('\n');
                    self.advance();
                    self.advance();
                }
                Some('\\') if self.peek_at(1) == Some('"') => {
                    self.advance();
                    out.push(self.advance().unwrap());
                }
                Some('\\') if self.peek_at(1) == Some('\\') => {
                    self.advance();
                    out.push(self.advance().unwrap());
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }

        Ok(out)
    }

    fn scan_ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || PUNCTUATION.contains(&c) || c == '"' {
                break;
            }
            if c == '\\' && self.peek_at(1) == Some('\n') {
                break;
            }
            if c == '/' && (self.peek_at(1) == Some('/') || self.peek_at(1) == Some('*')) {
                break;
            }
            out.push(c);
            self.advance();
        }
        out
    }
}

fn single_char_kind(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::GroupOpen,
        ')' => TokenKind::GroupClose,
        '{' => TokenKind::BlockOpen,
        '}' => TokenKind::BlockClose,
        ':' => TokenKind::Colon,
        ';' => TokenKind::Semi,
        ',' => TokenKind::Comma,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_group_header() {
        let toks = Lexer::new("cell(INVX1) {").tokenize().unwrap();
        assert_eq!(toks[0].lexeme, "cell");
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[1].kind, TokenKind::GroupOpen);
        assert_eq!(toks[2].lexeme, "INVX1");
        assert_eq!(toks[3].kind, TokenKind::GroupClose);
        assert_eq!(toks[4].kind, TokenKind::BlockOpen);
    }

    #[test]
    fn lexes_escaped_newline_as_token() {
        let toks = kinds("values ( \"1,2\" \\\n \"3,4\" );");
        assert!(toks.contains(&TokenKind::EscNewline));
    }

    #[test]
    fn string_with_line_continuation_preserves_escaped_newline() {
        let toks = Lexer::new("\"1,2,\\\n3\"").tokenize().unwrap();
        assert_eq!(toks[0].lexeme, "1,2,\\\n3");
    }

    #[test]
    fn unterminated_string_errors() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert!(matches!(err, LexerError::UnterminatedString { .. }));
    }

    #[test]
    fn ident_is_maximal_munch() {
        let toks = Lexer::new("0.276893").tokenize().unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[0].lexeme, "0.276893");
    }

    #[test]
    fn line_comment_stops_at_newline() {
        let toks = Lexer::new("// hello\nfoo").tokenize().unwrap();
        assert_eq!(toks[0].kind, TokenKind::Comment);
        assert_eq!(toks[0].lexeme, "// hello");
        assert_eq!(toks[1].lexeme, "foo");
        assert_eq!(toks[1].line, 2);
    }
}
