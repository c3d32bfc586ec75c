//! Canonical re-emission (§4.3), grounded on `rhai-fmt`'s `format_syntax`/
//! `format_source` entry points. Unlike `rhai-fmt`'s Wadler-style
//! line-breaking pretty-printer, this is a direct recursive emitter: the
//! Liberty canonical form has no line-width-driven wrapping decisions, only
//! the fixed matrix-continuation layout of §4.3.1.

use liberty_syntax::cst::{AttributeNode, GroupNode, Node, QuoteStyle, RootNode};
use liberty_syntax::numeric::format_number;
use liberty_syntax::shape::{looks_like_matrix, resolve_shape};
use liberty_syntax::token::{Token, TokenKind};

use crate::error::FormatterError;
use crate::options::Options;

/// Formats a parsed tree back to canonical Liberty text.
pub fn format_root(root: &RootNode, options: &Options) -> Result<String, FormatterError> {
    let mut out = String::new();
    for child in &root.children {
        format_node(child, 0, options, None, &mut out)?;
    }
    Ok(out)
}

fn format_node(
    node: &Node,
    depth: usize,
    options: &Options,
    enclosing: Option<&GroupNode>,
    out: &mut String,
) -> Result<(), FormatterError> {
    match node {
        Node::Root(_) => unreachable!("root node only appears at tree top"),
        Node::Comment(c) => {
            indent(out, depth, options);
            out.push_str(&c.text.lexeme);
            out.push('\n');
        }
        Node::Group(g) => {
            indent(out, depth, options);
            out.push_str(&g.name.lexeme);
            out.push('(');
            out.push_str(&render_value_tokens(&g.args));
            out.push_str(") {\n");
            for child in &g.children {
                format_node(child, depth + 1, options, Some(g), out)?;
            }
            indent(out, depth, options);
            out.push_str("}\n");
        }
        Node::Attribute(a) => format_attribute(a, depth, options, enclosing, out)?,
    }
    Ok(())
}

fn format_attribute(
    attr: &AttributeNode,
    depth: usize,
    options: &Options,
    enclosing: Option<&GroupNode>,
    out: &mut String,
) -> Result<(), FormatterError> {
    if looks_like_matrix(attr) {
        if let Some(group) = enclosing {
            return format_matrix_attribute(attr, group, depth, options, out);
        }
    }

    indent(out, depth, options);
    let raw_value = render_attribute_value_tokens(&attr.raw);
    let value = if attr.quote_style == QuoteStyle::Double {
        format!("\"{}\"", escape_string(&raw_value))
    } else {
        raw_value
    };
    if attr.use_parens {
        out.push_str(&attr.key.lexeme);
        out.push('(');
        out.push_str(&value);
        out.push_str(");\n");
    } else {
        out.push_str(&attr.key.lexeme);
        out.push_str(" : ");
        out.push_str(&value);
        out.push_str(";\n");
    }
    Ok(())
}

fn format_matrix_attribute(
    attr: &AttributeNode,
    group: &GroupNode,
    depth: usize,
    options: &Options,
    out: &mut String,
) -> Result<(), FormatterError> {
    let shape = resolve_shape(group, attr)?;
    let rows = decode_rows(&attr.raw);

    if shape.rows <= 1 {
        let cells: Vec<f64> = rows.into_iter().flatten().collect();
        let widths = vec![0usize; cells.len()];
        let rendered = render_row(&cells, &widths);

        indent(out, depth, options);
        if attr.use_parens {
            out.push_str(&attr.key.lexeme);
            out.push_str(" (");
            out.push_str(&rendered);
            out.push_str(");\n");
        } else {
            out.push_str(&attr.key.lexeme);
            out.push_str(" : \"");
            out.push_str(&rendered);
            out.push_str("\";\n");
        }
        return Ok(());
    }

    let widths = column_widths(&rows);
    let cont_indent_depth = depth + 1;

    indent(out, depth, options);
    out.push_str(&attr.key.lexeme);
    if attr.use_parens {
        out.push_str(" ( \\\n");
    } else {
        out.push_str(" : \\\n");
    }

    let last = rows.len().saturating_sub(1);
    for (i, row) in rows.iter().enumerate() {
        indent(out, cont_indent_depth, options);
        out.push('"');
        out.push_str(&render_row(row, &widths));
        out.push('"');

        if attr.use_parens {
            if i != last {
                out.push(',');
            }
            out.push_str(" \\\n");
        } else if i != last {
            out.push_str(", \\\n");
        } else {
            out.push_str(";\n");
        }
    }

    if attr.use_parens {
        indent(out, depth, options);
        out.push_str(");\n");
    }

    Ok(())
}

fn column_widths(rows: &[Vec<f64>]) -> Vec<usize> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in rows {
        for (i, v) in row.iter().enumerate() {
            let w = format_number(*v).chars().count();
            if w > widths[i] {
                widths[i] = w;
            }
        }
    }
    widths
}

fn render_row(row: &[f64], widths: &[usize]) -> String {
    row.iter()
        .enumerate()
        .map(|(i, v)| {
            let cell = format_number(*v);
            let width = widths.get(i).copied().unwrap_or(cell.chars().count());
            format!("{cell:>width$}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits raw tokens into rows at `ESC_NL`, parsing comma-split numeric
/// values out of each significant token. Used only to recover the cell
/// values for canonical re-alignment; the patch engine's matrix codec
/// (`liberty-patch`) additionally tracks per-token layout to preserve the
/// original grouping on encode, which the formatter does not need.
fn decode_rows(raw: &[Token]) -> Vec<Vec<f64>> {
    let mut rows: Vec<Vec<f64>> = vec![Vec::new()];
    for tok in raw {
        match tok.kind {
            TokenKind::EscNewline => rows.push(Vec::new()),
            TokenKind::Comment | TokenKind::Comma => {}
            TokenKind::String | TokenKind::Ident => {
                for part in tok.lexeme.split(',') {
                    let part = part.trim();
                    if part.is_empty() {
                        continue;
                    }
                    if let Ok(v) = part.parse::<f64>() {
                        rows.last_mut().unwrap().push(v);
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

/// Renders a non-matrix token list: identifiers/strings space-separated,
/// commas glued to the preceding piece (§4.3).
fn render_value_tokens(tokens: &[Token]) -> String {
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
        if tok.kind == TokenKind::String {
            out.push('"');
            out.push_str(&escape_string(&tok.lexeme));
            out.push('"');
        } else {
            out.push_str(&tok.lexeme);
        }
    }
    out
}

/// Renders a non-matrix *attribute value* token list: like
/// [`render_value_tokens`], but never wraps a `String` token in quotes
/// itself. An attribute's `quote_style` owns the quoting of the whole
/// rendered value exactly once in [`format_attribute`]; quoting here too
/// would double-quote the common case of a single quoted scalar (e.g.
/// `time_unit : "1ns";`).
fn render_attribute_value_tokens(tokens: &[Token]) -> String {
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

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn indent(out: &mut String, depth: usize, options: &Options) {
    out.push_str(&" ".repeat(depth * options.indent_size));
}
