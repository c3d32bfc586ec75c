//! Token kinds and the owned [`Token`] produced by the [`crate::lexer::Lexer`].

use serde::{Deserialize, Serialize};

/// The kind of a single lexical token.
///
/// Unlike a typical general-purpose-language lexer, Liberty has very few
/// punctuation tokens; almost everything that is not whitespace, a string,
/// or punctuation falls into [`TokenKind::Ident`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    GroupOpen,
    GroupClose,
    BlockOpen,
    BlockClose,
    Colon,
    Semi,
    Comma,
    String,
    Ident,
    Comment,
    /// A `\` immediately followed by `\n`. Carries syntactic meaning: it
    /// joins two physical lines into one logical line (§4.2.2).
    EscNewline,
}

/// A single lexical token, owning its decoded lexeme and its source position.
///
/// `line` and `column` locate the token's first character in the original
/// input (1-based). Tokens produced by the patch engine's matrix encoder
/// carry `line = 0, column = 0`, since formatting never depends on position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(rename = "value")]
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// A synthetic token with no source position, as produced when
    /// re-encoding a matrix attribute (§4.5).
    #[must_use]
    pub fn synthetic(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self::new(kind, lexeme, 0, 0)
    }

    #[must_use]
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Comment | TokenKind::EscNewline)
    }
}
