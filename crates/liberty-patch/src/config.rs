//! The normalized patch configuration (§6.3) the runner consumes. The YAML
//! source dialect and its shorthand expansion live in `liberty-config`,
//! which depends on this crate for the normalized shape it compiles down to.

use serde::{Deserialize, Serialize};

use crate::scope::Selector;
use crate::units::UnitExpectations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub expected_units: UnitExpectations,
    pub modifications: Vec<Modification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modification {
    pub scope: Scope,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub path: Vec<Selector>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    #[serde(default = "default_attribute")]
    pub attribute: String,
    pub operation: Option<String>,
    pub mode: Option<String>,
    pub value: Option<ActionValue>,
}

fn default_attribute() -> String {
    "values".to_string()
}

/// §6.3: a scalar broadcast value, or a full replacement matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    Scalar(f64),
    Matrix(Vec<Vec<f64>>),
}
