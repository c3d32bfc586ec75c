//! Recursive-descent parser for the Liberty dialect (§4.2).
//!
//! The grammar itself is a handful of productions; the interesting part is
//! the two dialect-disambiguation rules (§4.2.2 optional terminators,
//! §4.2.3 parenthesized-attribute-vs-group lookahead) which this module
//! centralizes in [`context::Context`] and the two `parse_*` helpers below.

mod context;

use thiserror::Error;
use tracing::debug;

use crate::cst::{AttributeNode, CommentNode, GroupNode, LibraryContext, Node, QuoteStyle, RootNode};
use crate::lexer::{Lexer, LexerError};
use crate::token::{Token, TokenKind};

use context::Context;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {line}:{column}: {message}")]
pub struct ParserError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// Either stage of turning source text into a tree can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// A successfully parsed file: the tree plus the units declared by its
/// top-level `library(...)` group.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub root: RootNode,
    pub context: LibraryContext,
}

/// Parses `source` into a [`ParseResult`].
pub fn parse(source: &str) -> Result<ParseResult, Error> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(token_count = tokens.len(), "lexed");
    let mut ctx = Context::new(tokens);
    let children = parse_nodes(&mut ctx, None)?;
    let root = RootNode { children };
    let context = LibraryContext::from_root(&root);
    Ok(ParseResult { root, context })
}

/// Parses nodes until `stop` is seen (consumed by the caller) or input ends.
fn parse_nodes(ctx: &mut Context, stop: Option<TokenKind>) -> Result<Vec<Node>, ParserError> {
    let mut nodes = Vec::new();

    loop {
        match ctx.peek_kind() {
            None => break,
            Some(kind) if Some(kind) == stop => break,
            Some(TokenKind::Comment) => {
                let text = ctx.advance().unwrap();
                nodes.push(Node::Comment(CommentNode { text }));
            }
            Some(TokenKind::EscNewline) => {
                ctx.advance();
            }
            Some(TokenKind::Ident) => {
                nodes.push(parse_group_or_attribute(ctx)?);
            }
            Some(TokenKind::BlockClose) => {
                return Err(ctx.error("unexpected '}'"));
            }
            Some(_) => {
                return Err(ctx.error("unexpected token"));
            }
        }
    }

    Ok(nodes)
}

/// Parses one `IDENT`-led statement, disambiguating group vs. parenthesized
/// attribute per §4.2.3, and colon-attribute vs. the above per §4.2.1.
fn parse_group_or_attribute(ctx: &mut Context) -> Result<Node, ParserError> {
    let name = ctx.advance().expect("caller checked IDENT");

    match ctx.peek_kind() {
        Some(TokenKind::GroupOpen) => parse_paren_led(ctx, name),
        Some(TokenKind::Colon) => parse_colon_attribute(ctx, name),
        _ => Err(ctx.error("expected '(' or ':' after identifier")),
    }
}

/// Disambiguates `name(...) {` (group) from `name(...);`/`name(...)\n` (attribute),
/// per §4.2.3: scan to the matching `)`, then look at what follows it.
fn parse_paren_led(ctx: &mut Context, name: Token) -> Result<Node, ParserError> {
    let open_idx = ctx.pos();
    let close_idx = ctx
        .find_matching_close(open_idx)
        .ok_or_else(|| ctx.error("unclosed '('"))?;

    let after_kind = ctx.token_at(close_idx + 1).map(|t| t.kind);
    let is_group = after_kind == Some(TokenKind::BlockOpen);

    ctx.advance(); // consume '('
    let args = collect_balanced(ctx)?;
    let close_tok = ctx.expect(TokenKind::GroupClose, "expected ')'")?;

    if is_group {
        ctx.expect(TokenKind::BlockOpen, "expected '{' to open group body")?;
        let children = parse_nodes(ctx, Some(TokenKind::BlockClose))?;
        ctx.expect(TokenKind::BlockClose, "expected '}' to close group body")?;
        Ok(Node::Group(GroupNode {
            name,
            args,
            children,
        }))
    } else {
        consume_terminator_after_parens(ctx, close_tok.line)?;
        let quote_style = infer_quote_style(&args);
        Ok(Node::Attribute(AttributeNode {
            key: name,
            raw: args,
            quote_style,
            use_parens: true,
        }))
    }
}

fn parse_colon_attribute(ctx: &mut Context, name: Token) -> Result<Node, ParserError> {
    ctx.expect(TokenKind::Colon, "expected ':'")?;
    let raw = collect_rhs_until_terminator(ctx);

    if ctx.peek_kind() == Some(TokenKind::Semi) {
        ctx.advance();
    }

    let quote_style = infer_quote_style(&raw);
    Ok(Node::Attribute(AttributeNode {
        key: name,
        raw,
        quote_style,
        use_parens: false,
    }))
}

/// Collects tokens up to (not including) the matching unbalanced `)`.
fn collect_balanced(ctx: &mut Context) -> Result<Vec<Token>, ParserError> {
    let mut depth = 0i32;
    let mut out = Vec::new();

    loop {
        match ctx.peek_kind() {
            None => return Err(ctx.error("unexpected end of input inside '(...)'")),
            Some(TokenKind::GroupClose) if depth == 0 => break,
            Some(TokenKind::GroupOpen) => {
                depth += 1;
                out.push(ctx.advance().unwrap());
            }
            Some(TokenKind::GroupClose) => {
                depth -= 1;
                out.push(ctx.advance().unwrap());
            }
            Some(_) => out.push(ctx.advance().unwrap()),
        }
    }

    Ok(out)
}

/// Collects an attribute RHS up to an explicit `;` or an implicit newline
/// termination (§4.2.2): the next token starts a later line than the last
/// collected token, unless that last token was `ESC_NL`.
fn collect_rhs_until_terminator(ctx: &mut Context) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    let mut depth = 0i32;

    loop {
        let Some(tok) = ctx.peek() else { break };

        if depth == 0 && tok.kind == TokenKind::Semi {
            break;
        }

        if depth == 0 && tok.kind == TokenKind::BlockClose {
            break;
        }

        if depth == 0 {
            if let Some(last) = out.last() {
                if tok.line > last.line && last.kind != TokenKind::EscNewline {
                    break;
                }
            }
        }

        match tok.kind {
            TokenKind::GroupOpen => depth += 1,
            TokenKind::GroupClose => depth = (depth - 1).max(0),
            _ => {}
        }

        out.push(ctx.advance().unwrap());
    }

    out
}

/// §4.2.2: after a parenthesized attribute's closing `)`, a terminator is
/// accepted if it is `;`, end of input, `}`, or starts a later line.
fn consume_terminator_after_parens(ctx: &mut Context, close_line: u32) -> Result<(), ParserError> {
    match ctx.peek() {
        None => Ok(()),
        Some(t) if t.kind == TokenKind::Semi => {
            ctx.advance();
            Ok(())
        }
        Some(t) if t.kind == TokenKind::BlockClose => Ok(()),
        Some(t) if t.line > close_line => Ok(()),
        _ => Err(ctx.error("expected terminator after parenthesized attribute")),
    }
}

/// §4.2.4: an attribute is double-quoted iff its first significant RHS
/// token (skipping comments and `ESC_NL`) is a `STRING`.
fn infer_quote_style(raw: &[Token]) -> QuoteStyle {
    raw.iter()
        .find(|t| !matches!(t.kind, TokenKind::Comment | TokenKind::EscNewline))
        .map(|t| {
            if t.kind == TokenKind::String {
                QuoteStyle::Double
            } else {
                QuoteStyle::Bare
            }
        })
        .unwrap_or(QuoteStyle::Bare)
}
