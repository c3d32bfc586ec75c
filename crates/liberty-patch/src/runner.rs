//! The patch runner (§4.6), grounded on
//! `examples/original_source/patch_engine/runner.py`'s step order: validate
//! units, resolve each modification's scope, then walk every matched
//! group's subtree applying the action to every attribute with the target
//! key.

use liberty_syntax::cst::{AttributeNode, GroupNode, LibraryContext, Node, RootNode};
use liberty_syntax::shape::resolve_shape_from;
use liberty_syntax::token::Token;

use crate::config::{Action, ActionValue, Config};
use crate::error::{MatrixShapeError, PatchActionError, PatchError};
use crate::matrix;
use crate::scope::{self, group_at_mut};
use crate::units;

#[derive(Debug, Clone)]
pub struct PatchSummary {
    pub batch_id: String,
    pub modified_groups: Vec<String>,
}

/// Applies every modification in `config` to `root`, in order.
///
/// `batch_id` is supplied by the caller rather than generated here: the
/// runner is a pure transformation over an already-parsed tree and does not
/// call out to wall-clock or randomness sources.
pub fn run(
    root: &mut RootNode,
    context: &LibraryContext,
    config: &Config,
    batch_id: String,
) -> Result<PatchSummary, PatchError> {
    units::validate(&config.expected_units, context)?;

    let mut modified_groups = Vec::new();

    for modification in &config.modifications {
        let paths = scope::resolve(root, &modification.scope.path, true)?;

        for path in paths {
            let display_name = display_name_for(root, &path);
            let group = group_at_mut(root, &path).expect("path was just resolved against this tree");
            if apply_within_group(group, &modification.action)? {
                modified_groups.push(display_name);
            }
        }
    }

    Ok(PatchSummary {
        batch_id,
        modified_groups,
    })
}

fn display_name_for(root: &RootNode, path: &[usize]) -> String {
    let mut parts = Vec::new();
    let mut children = &root.children;

    for &index in path {
        let Some(Node::Group(group)) = children.get(index) else {
            break;
        };
        let arg = group.first_arg().unwrap_or("");
        parts.push(format!("{}({})", group.name.lexeme, arg));
        children = &group.children;
    }

    parts.join("/")
}

/// Depth-first walk of `group`'s subtree, applying `action` to every
/// attribute whose key matches `action.attribute`. Returns whether any
/// attribute was modified.
fn apply_within_group(group: &mut GroupNode, action: &Action) -> Result<bool, PatchError> {
    let index_1 = group.find_attribute("index_1").map(|a| a.raw.clone());
    let index_2 = group.find_attribute("index_2").map(|a| a.raw.clone());
    let mut any = false;

    for child in &mut group.children {
        match child {
            Node::Attribute(attr) if attr.key.lexeme == action.attribute => {
                apply_to_attribute(attr, index_1.as_deref(), index_2.as_deref(), action)?;
                any = true;
            }
            Node::Group(sub) => {
                if apply_within_group(sub, action)? {
                    any = true;
                }
            }
            _ => {}
        }
    }

    Ok(any)
}

fn apply_to_attribute(
    attr: &mut AttributeNode,
    index_1: Option<&[Token]>,
    index_2: Option<&[Token]>,
    action: &Action,
) -> Result<(), PatchError> {
    let shape = resolve_shape_from(index_1, index_2, &attr.raw, &attr.key.lexeme)
        .map_err(MatrixShapeError::from)?;
    let (rows, layout) = matrix::decode(&attr.raw);
    let edited = apply_operation(&rows, shape.cols, action)?;
    attr.raw = matrix::encode(&edited, &layout);
    Ok(())
}

fn apply_operation(
    rows: &[Vec<f64>],
    cols: usize,
    action: &Action,
) -> Result<Vec<Vec<f64>>, PatchError> {
    let operation = action
        .operation
        .as_deref()
        .ok_or(PatchActionError::MissingOperation)?;
    let mode = action.mode.as_deref().unwrap_or("broadcast");
    let value = action.value.as_ref().ok_or(PatchActionError::MissingValue)?;

    match (operation, mode) {
        ("multiply", "broadcast") => {
            let scalar = scalar_value(value)?;
            Ok(rows
                .iter()
                .map(|row| row.iter().map(|v| v * scalar).collect())
                .collect())
        }
        ("add", "broadcast") => {
            let scalar = scalar_value(value)?;
            Ok(rows
                .iter()
                .map(|row| row.iter().map(|v| v + scalar).collect())
                .collect())
        }
        ("add", "matrix") => {
            let operand = matrix_value(value)?;
            if operand.len() != rows.len() || operand.iter().any(|r| r.len() != cols) {
                return Err(MatrixShapeError::Mismatch {
                    op_rows: operand.len(),
                    op_cols: operand.first().map(Vec::len).unwrap_or(0),
                    target_rows: rows.len(),
                    target_cols: cols,
                }
                .into());
            }
            Ok(rows
                .iter()
                .zip(operand)
                .map(|(row, op_row)| row.iter().zip(op_row).map(|(a, b)| a + b).collect())
                .collect())
        }
        _ => Err(PatchActionError::UnsupportedOperationMode {
            operation: operation.to_string(),
            mode: mode.to_string(),
        }
        .into()),
    }
}

fn scalar_value(value: &ActionValue) -> Result<f64, PatchError> {
    match value {
        ActionValue::Scalar(s) => Ok(*s),
        ActionValue::Matrix(_) => Err(PatchActionError::UnsupportedOperationMode {
            operation: "broadcast".into(),
            mode: "matrix-valued".into(),
        }
        .into()),
    }
}

fn matrix_value(value: &ActionValue) -> Result<Vec<Vec<f64>>, PatchError> {
    match value {
        ActionValue::Matrix(m) => Ok(m.clone()),
        ActionValue::Scalar(_) => Err(PatchActionError::UnsupportedOperationMode {
            operation: "matrix".into(),
            mode: "scalar-valued".into(),
        }
        .into()),
    }
}
