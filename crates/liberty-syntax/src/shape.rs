//! Matrix shape resolution (§4.3.1, §4.5), shared between the formatter and
//! the patch engine so the sibling-attribute lookup lives in exactly one
//! place instead of being duplicated the way it was in the system this was
//! distilled from.

use thiserror::Error;

use crate::cst::{AttributeNode, GroupNode};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error(
        "attribute `{key}` has {actual} numeric values, which does not match the shape {rows}x{cols} resolved from index_1/index_2"
    )]
    Mismatch {
        key: String,
        actual: usize,
        rows: usize,
        cols: usize,
    },
}

/// Counts the numeric values carried by a token slice: every significant
/// `STRING`/`IDENT` token contributes its comma-split, non-empty parts.
#[must_use]
pub fn count_numeric_values(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::String | TokenKind::Ident))
        .map(|t| t.lexeme.split(',').filter(|p| !p.trim().is_empty()).count())
        .sum()
}

/// Resolves the shape of a matrix attribute by consulting its enclosing
/// group's `index_1`/`index_2` siblings (§4.3.1).
pub fn resolve_shape(group: &GroupNode, attr: &AttributeNode) -> Result<MatrixShape, ShapeError> {
    resolve_shape_from(
        group.find_attribute("index_1").map(|a| a.raw.as_slice()),
        group.find_attribute("index_2").map(|a| a.raw.as_slice()),
        &attr.raw,
        &attr.key.lexeme,
    )
}

/// Lower-level form of [`resolve_shape`] taking the sibling index tokens
/// directly, for callers (the patch runner) that hold a mutable borrow of
/// the attribute being resolved and so cannot also hold an immutable
/// `&GroupNode` borrow at the same time.
pub fn resolve_shape_from(
    index_1: Option<&[Token]>,
    index_2: Option<&[Token]>,
    attr_raw: &[Token],
    key: &str,
) -> Result<MatrixShape, ShapeError> {
    let actual = count_numeric_values(attr_raw);

    let shape = match (index_1, index_2) {
        (Some(i1), Some(i2)) => MatrixShape {
            rows: count_numeric_values(i1),
            cols: count_numeric_values(i2),
        },
        (Some(i1), None) => MatrixShape {
            rows: 1,
            cols: count_numeric_values(i1),
        },
        (None, _) => MatrixShape { rows: 1, cols: actual },
    };

    if shape.rows.saturating_mul(shape.cols) != actual {
        return Err(ShapeError::Mismatch {
            key: key.to_string(),
            actual,
            rows: shape.rows,
            cols: shape.cols,
        });
    }

    Ok(shape)
}

/// Heuristic matrix-attribute detection (§4.3.1): `values`, or any attribute
/// whose significant raw tokens are all comma-split-numeric with at least
/// one row separator.
#[must_use]
pub fn looks_like_matrix(attr: &AttributeNode) -> bool {
    if attr.key.lexeme == "values" {
        return true;
    }

    let mut has_separator = false;
    let mut saw_any = false;

    for tok in &attr.raw {
        match tok.kind {
            TokenKind::Comment => continue,
            TokenKind::EscNewline => {
                has_separator = true;
                continue;
            }
            TokenKind::Comma => {
                has_separator = true;
                continue;
            }
            TokenKind::String | TokenKind::Ident => {
                saw_any = true;
                for part in tok.lexeme.split(',') {
                    let part = part.trim();
                    if part.is_empty() {
                        continue;
                    }
                    if part.parse::<f64>().is_err() {
                        return false;
                    }
                }
            }
            _ => return false,
        }
    }

    saw_any && has_separator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::QuoteStyle;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    fn attr(key: &str, raw: Vec<Token>) -> AttributeNode {
        AttributeNode {
            key: tok(TokenKind::Ident, key),
            raw,
            quote_style: QuoteStyle::Bare,
            use_parens: true,
        }
    }

    fn group(children: Vec<crate::cst::Node>) -> GroupNode {
        GroupNode {
            name: tok(TokenKind::Ident, "cell"),
            args: vec![tok(TokenKind::Ident, "A")],
            children,
        }
    }

    #[test]
    fn resolves_2x2_shape() {
        let index_1 = attr(
            "index_1",
            vec![tok(TokenKind::Ident, "0.1"), tok(TokenKind::Comma, ","), tok(TokenKind::Ident, "0.2")],
        );
        let index_2 = attr(
            "index_2",
            vec![tok(TokenKind::Ident, "1"), tok(TokenKind::Comma, ","), tok(TokenKind::Ident, "2")],
        );
        let values = attr(
            "values",
            vec![
                tok(TokenKind::String, "1,2"),
                tok(TokenKind::EscNewline, "\\\n"),
                tok(TokenKind::String, "3,4"),
            ],
        );

        let g = group(vec![
            crate::cst::Node::Attribute(index_1),
            crate::cst::Node::Attribute(index_2),
        ]);

        let shape = resolve_shape(&g, &values).unwrap();
        assert_eq!(shape, MatrixShape { rows: 2, cols: 2 });
    }

    #[test]
    fn mismatched_shape_errors() {
        let index_1 = attr("index_1", vec![tok(TokenKind::Ident, "0.1")]);
        let values = attr(
            "values",
            vec![tok(TokenKind::Ident, "1"), tok(TokenKind::Comma, ","), tok(TokenKind::Ident, "2")],
        );
        let g = group(vec![crate::cst::Node::Attribute(index_1)]);
        assert!(resolve_shape(&g, &values).is_err());
    }

    #[test]
    fn detects_matrix_like_attribute() {
        let a = attr(
            "rise_capacitance_range",
            vec![tok(TokenKind::Ident, "0.276893"), tok(TokenKind::Comma, ","), tok(TokenKind::Ident, "0.440626")],
        );
        assert!(looks_like_matrix(&a));
    }
}
