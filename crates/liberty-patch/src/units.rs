//! Unit precondition validation (§4.6 step 1-2), grounded on
//! `examples/original_source/patch_engine/units.py`.

use liberty_syntax::cst::LibraryContext;
use serde::{Deserialize, Serialize};

use crate::error::UnitMismatchError;

/// Units a patch run expects the library to declare. Absent fields are not
/// checked (§4.6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitExpectations {
    #[serde(default)]
    pub time_unit: Option<String>,
    #[serde(default)]
    pub voltage_unit: Option<String>,
    #[serde(default)]
    pub leakage_power_unit: Option<String>,
}

/// Validates `expectations` against a parsed library's declared units.
/// A mismatch is fatal: the caller must not apply any modification.
pub fn validate(
    expectations: &UnitExpectations,
    context: &LibraryContext,
) -> Result<(), UnitMismatchError> {
    check("time_unit", &expectations.time_unit, &context.time_unit)?;
    check("voltage_unit", &expectations.voltage_unit, &context.voltage_unit)?;
    check(
        "leakage_power_unit",
        &expectations.leakage_power_unit,
        &context.leakage_power_unit,
    )?;
    Ok(())
}

fn check(
    kind: &'static str,
    expected: &Option<String>,
    actual: &Option<String>,
) -> Result<(), UnitMismatchError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let actual_value = actual.clone().unwrap_or_default();
    if &actual_value != expected {
        return Err(UnitMismatchError {
            unit_kind: kind,
            expected: expected.clone(),
            actual: actual_value,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_expectation_absent() {
        let expectations = UnitExpectations::default();
        let context = LibraryContext {
            time_unit: Some("2ns".into()),
            ..Default::default()
        };
        assert!(validate(&expectations, &context).is_ok());
    }

    #[test]
    fn fails_on_mismatch() {
        let expectations = UnitExpectations {
            time_unit: Some("1ns".into()),
            ..Default::default()
        };
        let context = LibraryContext {
            time_unit: Some("2ns".into()),
            ..Default::default()
        };
        let err = validate(&expectations, &context).unwrap_err();
        assert_eq!(err.unit_kind, "time_unit");
        assert_eq!(err.expected, "1ns");
        assert_eq!(err.actual, "2ns");
    }
}
