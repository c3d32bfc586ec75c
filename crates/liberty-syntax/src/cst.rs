//! The lossless concrete syntax tree.
//!
//! One tagged variant per §3/§9's Design Notes, replacing the dynamic-typed
//! base-class approach of the system this was distilled from. Nodes are
//! owned outright by their parent; there is no parent back-reference stored
//! on the node itself. The handful of algorithms that need to see a node's
//! enclosing group (matrix shape resolution, §4.3.1/§4.5) take that group as
//! an explicit parameter instead, which keeps the tree a plain owned
//! structure with no `Rc`/`Weak` bookkeeping.

use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStyle {
    Bare,
    Double,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootNode {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupNode {
    pub name: Token,
    /// Raw tokens between the header's `(` and `)`, commas and strings included.
    pub args: Vec<Token>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeNode {
    pub key: Token,
    /// Raw RHS tokens, comments and `ESC_NL` included.
    pub raw: Vec<Token>,
    pub quote_style: QuoteStyle,
    pub use_parens: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    pub text: Token,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root(RootNode),
    Group(GroupNode),
    Attribute(AttributeNode),
    Comment(CommentNode),
}

impl Node {
    #[must_use]
    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_group_mut(&mut self) -> Option<&mut GroupNode> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attribute(&self) -> Option<&AttributeNode> {
        match self {
            Node::Attribute(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attribute_mut(&mut self) -> Option<&mut AttributeNode> {
        match self {
            Node::Attribute(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(r) => &r.children,
            Node::Group(g) => &g.children,
            Node::Attribute(_) | Node::Comment(_) => &[],
        }
    }

    #[must_use]
    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Root(r) => &mut r.children,
            Node::Group(g) => &mut g.children,
            Node::Attribute(_) | Node::Comment(_) => &mut [],
        }
    }
}

impl GroupNode {
    #[must_use]
    pub fn find_attribute(&self, key: &str) -> Option<&AttributeNode> {
        self.children.iter().find_map(|n| match n {
            Node::Attribute(a) if a.key.lexeme == key => Some(a),
            _ => None,
        })
    }

    /// First argument token's lexeme, used as the group's "name" by the
    /// scope resolver (§4.4).
    #[must_use]
    pub fn first_arg(&self) -> Option<&str> {
        self.args
            .iter()
            .find(|t| !matches!(t.kind, TokenKind::Comment | TokenKind::EscNewline))
            .map(|t| t.lexeme.as_str())
    }

    /// Joined args, commas glued to the preceding piece, used for the
    /// scope resolver's `args` clause (§4.4).
    #[must_use]
    pub fn joined_args(&self) -> String {
        join_significant_tokens(&self.args)
    }
}

impl AttributeNode {
    /// Joined RHS value, used by the scope resolver's `attributes` clause (§4.4).
    #[must_use]
    pub fn joined_value(&self) -> String {
        join_significant_tokens(&self.raw)
    }
}

/// Joins the significant (non-comment, non-`ESC_NL`) tokens of a slice with
/// spaces, gluing a comma directly onto the token before it. Shared by the
/// group-args and attribute-value flattening used for scope matching.
#[must_use]
pub fn join_significant_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for tok in tokens {
        if matches!(tok.kind, TokenKind::Comment | TokenKind::EscNewline) {
            continue;
        }
        if tok.kind == TokenKind::Comma {
            out.push(',');
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&tok.lexeme);
    }
    out
}

/// Units declared by the top-level `library(...)` group (§3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryContext {
    pub time_unit: Option<String>,
    pub voltage_unit: Option<String>,
    pub leakage_power_unit: Option<String>,
}

impl LibraryContext {
    /// Extracts units from the top-level `library(...)` group's direct attributes.
    #[must_use]
    pub fn from_root(root: &RootNode) -> Self {
        let library = root.children.iter().find_map(|n| match n {
            Node::Group(g) if g.name.lexeme == "library" => Some(g),
            _ => None,
        });

        let Some(library) = library else {
            return Self::default();
        };

        Self {
            time_unit: library.find_attribute("time_unit").map(|a| a.joined_value()),
            voltage_unit: library
                .find_attribute("voltage_unit")
                .map(|a| a.joined_value()),
            leakage_power_unit: library
                .find_attribute("leakage_power_unit")
                .map(|a| a.joined_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    #[test]
    fn joins_tokens_gluing_commas() {
        let tokens = vec![
            tok(TokenKind::Ident, "0.1"),
            tok(TokenKind::Comma, ","),
            tok(TokenKind::Ident, "0.2"),
        ];
        assert_eq!(join_significant_tokens(&tokens), "0.1, 0.2");
    }

    #[test]
    fn library_context_reads_units() {
        let root = RootNode {
            children: vec![Node::Group(GroupNode {
                name: tok(TokenKind::Ident, "library"),
                args: vec![tok(TokenKind::Ident, "test")],
                children: vec![Node::Attribute(AttributeNode {
                    key: tok(TokenKind::Ident, "time_unit"),
                    raw: vec![tok(TokenKind::String, "1ns")],
                    quote_style: QuoteStyle::Double,
                    use_parens: false,
                })],
            })],
        };

        let ctx = LibraryContext::from_root(&root);
        assert_eq!(ctx.time_unit.as_deref(), Some("1ns"));
        assert_eq!(ctx.voltage_unit, None);
    }
}
