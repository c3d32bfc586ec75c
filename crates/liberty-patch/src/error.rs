use thiserror::Error;

/// The path prefix that resolved, and the selector that then failed to
/// match anything (§4.4 failure mode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scope path failed at selector {selector_index} ({selector_debug}); {matched_prefix} leading selector(s) matched")]
pub struct ScopeMatchError {
    pub matched_prefix: usize,
    pub selector_index: usize,
    pub selector_debug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unit mismatch: expected {expected}, library declares {actual}")]
pub struct UnitMismatchError {
    pub unit_kind: &'static str,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixShapeError {
    #[error("matrix operand shape {op_rows}x{op_cols} does not match target shape {target_rows}x{target_cols}")]
    Mismatch {
        op_rows: usize,
        op_cols: usize,
        target_rows: usize,
        target_cols: usize,
    },
    #[error(transparent)]
    Shape(#[from] liberty_syntax::shape::ShapeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchActionError {
    #[error("action is missing a required 'operation' field")]
    MissingOperation,
    #[error("action is missing a required 'value' field")]
    MissingValue,
    #[error("unsupported operation/mode combination: {operation}/{mode}")]
    UnsupportedOperationMode { operation: String, mode: String },
}

#[derive(Debug, Error)]
pub enum ProvenanceError {
    #[error("failed to write provenance record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize provenance record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    ScopeMatch(#[from] ScopeMatchError),
    #[error(transparent)]
    UnitMismatch(#[from] UnitMismatchError),
    #[error(transparent)]
    MatrixShape(#[from] MatrixShapeError),
    #[error(transparent)]
    PatchAction(#[from] PatchActionError),
    #[error(transparent)]
    Provenance(#[from] ProvenanceError),
}
