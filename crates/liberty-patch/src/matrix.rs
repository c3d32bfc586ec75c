//! Matrix codec: decode a raw token RHS into numeric cells plus a layout
//! descriptor, and encode an edited matrix back into tokens preserving that
//! layout (§4.5).
//!
//! Grounded on `examples/original_source/patch_engine/matrix.py`'s
//! decode/encode split, but richer on the encode side: the original always
//! collapses each row to a single string token on re-emission, while this
//! implementation restores the original per-row token grouping and
//! quote/unquote form whenever the new matrix's row shapes still fit it.

use liberty_syntax::numeric::format_number;
use liberty_syntax::token::{Token, TokenKind};

/// How many numeric values came out of each original token in a row, so
/// re-encoding can rebuild the same token grouping when shapes still match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLayout {
    pub token_counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub rows: Vec<RowLayout>,
    pub has_escaped_newline: bool,
    pub quoted: bool,
}

/// Splits `raw` into rows at `ESC_NL`, parsing comma-split numeric values
/// out of each significant token, and records the layout needed to encode
/// an edited matrix back into tokens that look like the source.
#[must_use]
pub fn decode(raw: &[Token]) -> (Vec<Vec<f64>>, Layout) {
    let mut rows: Vec<Vec<f64>> = vec![Vec::new()];
    let mut row_layouts: Vec<RowLayout> = vec![RowLayout::default()];
    let mut has_escaped_newline = false;
    let mut quoted = false;
    let mut quoted_determined = false;

    for tok in raw {
        match tok.kind {
            TokenKind::EscNewline => {
                has_escaped_newline = true;
                rows.push(Vec::new());
                row_layouts.push(RowLayout::default());
            }
            TokenKind::Comment | TokenKind::Comma => {}
            TokenKind::String | TokenKind::Ident => {
                if !quoted_determined {
                    quoted = tok.kind == TokenKind::String;
                    quoted_determined = true;
                }

                let mut count = 0usize;
                for part in tok.lexeme.split(',') {
                    let part = part.trim();
                    if part.is_empty() {
                        continue;
                    }
                    if let Ok(v) = part.parse::<f64>() {
                        rows.last_mut().unwrap().push(v);
                        count += 1;
                    }
                }
                row_layouts.last_mut().unwrap().token_counts.push(count);
            }
            _ => {}
        }
    }

    (
        rows,
        Layout {
            rows: row_layouts,
            has_escaped_newline,
            quoted,
        },
    )
}

/// Re-encodes an edited matrix into tokens, reusing `layout`'s original
/// per-row token grouping when each row's new length still matches the sum
/// of that row's original token counts; otherwise collapsing the row to a
/// single token (§4.5).
#[must_use]
pub fn encode(matrix: &[Vec<f64>], layout: &Layout) -> Vec<Token> {
    let mut tokens = Vec::new();
    let row_count = matrix.len();

    for (i, row) in matrix.iter().enumerate() {
        let row_layout = layout.rows.get(i);
        let usable = row_layout
            .map(|rl| rl.token_counts.iter().sum::<usize>() == row.len() && !rl.token_counts.is_empty())
            .unwrap_or(false);

        if layout.quoted {
            if usable {
                let rl = row_layout.unwrap();
                let mut idx = 0;
                for (k, &count) in rl.token_counts.iter().enumerate() {
                    if k > 0 {
                        tokens.push(Token::synthetic(TokenKind::Comma, ","));
                    }
                    let chunk = &row[idx..idx + count];
                    idx += count;
                    let text = chunk.iter().map(|v| format_number(*v)).collect::<Vec<_>>().join(",");
                    tokens.push(Token::synthetic(TokenKind::String, text));
                }
            } else {
                let text = row.iter().map(|v| format_number(*v)).collect::<Vec<_>>().join(",");
                tokens.push(Token::synthetic(TokenKind::String, text));
            }
        } else {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    tokens.push(Token::synthetic(TokenKind::Comma, ","));
                }
                tokens.push(Token::synthetic(TokenKind::Ident, format_number(*v)));
            }
        }

        if layout.has_escaped_newline && i + 1 < row_count {
            tokens.push(Token::synthetic(TokenKind::EscNewline, "\\\n"));
        }
    }

    tokens
}
