//! Compiles the YAML source dialect of §6.3 into the normalized `Config`
//! `liberty-patch` consumes (§4.7).
//!
//! Grounded on `examples/original_source/config_compiler.py`: the compiler
//! walks a generic JSON value tree rather than deserializing straight into
//! `Config`, because the shorthand forms (a bare path array for `scope`, a
//! one-key map for a selector, `attrs` as an alias for `attributes`) are not
//! valid instances of the normalized type.

use std::path::Path;

use serde_json::{Map, Value};

use liberty_patch::Config;

use crate::error::ConfigCompilerError;

/// Parses `yaml_text` and compiles it into a normalized [`Config`].
pub fn compile_yaml_str(yaml_text: &str) -> Result<Config, ConfigCompilerError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml_text)?;
    let value = serde_json::to_value(raw).map_err(ConfigCompilerError::Normalize)?;
    compile_value(value)
}

/// Compiles `yaml_text`, optionally exporting the normalized form as pretty
/// JSON to `export_json_path` (the `compile-config` subcommand's job, §6.2).
pub fn compile_yaml_str_with_export(
    yaml_text: &str,
    export_json_path: Option<&Path>,
) -> Result<Config, ConfigCompilerError> {
    let config = compile_yaml_str(yaml_text)?;
    if let Some(path) = export_json_path {
        let json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, json)?;
    }
    Ok(config)
}

/// Compiles an already-parsed generic value tree (the JSON dialect is
/// accepted verbatim here too, since normalized JSON is also valid input).
pub fn compile_value(value: Value) -> Result<Config, ConfigCompilerError> {
    let Value::Object(mut root) = value else {
        return Err(ConfigCompilerError::RootNotMapping);
    };

    let modifications = root
        .remove("modifications")
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let Value::Array(modifications) = modifications else {
        return Err(ConfigCompilerError::ModificationsNotList);
    };

    let compiled_modifications = modifications
        .into_iter()
        .map(compile_modification)
        .collect::<Result<Vec<_>, _>>()?;

    let expected_units = root
        .remove("expected_units")
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut compiled = Map::new();
    compiled.insert("expected_units".to_string(), expected_units);
    compiled.insert(
        "modifications".to_string(),
        Value::Array(compiled_modifications),
    );

    serde_json::from_value(Value::Object(compiled)).map_err(ConfigCompilerError::Normalize)
}

fn compile_modification(modification: Value) -> Result<Value, ConfigCompilerError> {
    let Value::Object(mut modification) = modification else {
        return Err(ConfigCompilerError::ModificationNotMapping);
    };

    let scope = modification
        .remove("scope")
        .unwrap_or_else(|| Value::Object(Map::new()));
    modification.insert("scope".to_string(), compile_scope(scope)?);

    Ok(Value::Object(modification))
}

/// §4.7: `scope` may be `{path: [...]}`, or (ambient convenience kept from
/// the original compiler) a bare path array wrapped into `{path: [...]}`.
fn compile_scope(scope: Value) -> Result<Value, ConfigCompilerError> {
    match scope {
        Value::Array(items) => {
            let path = items
                .into_iter()
                .map(compile_path_selector)
                .collect::<Result<Vec<_>, _>>()?;
            let mut out = Map::new();
            out.insert("path".to_string(), Value::Array(path));
            Ok(Value::Object(out))
        }
        Value::Object(mut scope) => {
            let path = scope
                .remove("path")
                .ok_or(ConfigCompilerError::ScopeMissingPath)?;
            let Value::Array(path) = path else {
                return Err(ConfigCompilerError::PathNotList);
            };
            let compiled_path = path
                .into_iter()
                .map(compile_path_selector)
                .collect::<Result<Vec<_>, _>>()?;
            scope.insert("path".to_string(), Value::Array(compiled_path));
            Ok(Value::Object(scope))
        }
        _ => Err(ConfigCompilerError::ScopeNotMappingOrList),
    }
}

/// §6.3 shorthands:
/// - a bare string becomes `{group: <string>}`.
/// - a one-key map `{group_name: pattern_or_map}` becomes
///   `{group: group_name, name: pattern}` (pattern case) or
///   `{group: group_name, ...fields}` (map case).
/// - a full map already containing `group` is normalized as-is.
fn compile_path_selector(selector: Value) -> Result<Value, ConfigCompilerError> {
    match selector {
        Value::String(group) => {
            let mut out = Map::new();
            out.insert("group".to_string(), Value::String(group));
            Ok(Value::Object(out))
        }
        Value::Object(selector) => {
            if selector.contains_key("group") {
                return normalize_attribute_alias(selector);
            }
            if selector.len() == 1 {
                let (key, value) = selector.into_iter().next().expect("len == 1");
                let mut compiled = Map::new();
                compiled.insert("group".to_string(), Value::String(key));
                match value {
                    Value::Object(fields) => compiled.extend(fields),
                    Value::Null => {}
                    other => {
                        compiled.insert("name".to_string(), other);
                    }
                }
                return normalize_attribute_alias(compiled);
            }
            normalize_attribute_alias(selector)
        }
        _ => Err(ConfigCompilerError::SelectorNotMappingOrString),
    }
}

/// `attrs` is an alias for `attributes`; both present in the same selector
/// is a compile error (§4.7).
fn normalize_attribute_alias(mut selector: Map<String, Value>) -> Result<Value, ConfigCompilerError> {
    if let Some(attrs) = selector.remove("attrs") {
        if selector.contains_key("attributes") {
            return Err(ConfigCompilerError::ConflictingAttributeAliases);
        }
        selector.insert("attributes".to_string(), attrs);
    }
    Ok(Value::Object(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_bare_string_selector_to_group() {
        let yaml = r#"
modifications:
  - scope:
      path:
        - cell
    action:
      operation: multiply
      mode: broadcast
      value: 1.1
"#;
        let config = compile_yaml_str(yaml).unwrap();
        assert_eq!(config.modifications.len(), 1);
        assert_eq!(
            config.modifications[0].scope.path[0].group.as_ref().map(|p| format!("{p:?}")),
            Some("Glob(\"cell\")".to_string())
        );
    }

    #[test]
    fn compiles_one_key_map_shorthand_with_pattern() {
        let yaml = r#"
modifications:
  - scope:
      path:
        - cell: "INV*"
    action:
      operation: multiply
      mode: broadcast
      value: 2.0
"#;
        let config = compile_yaml_str(yaml).unwrap();
        let selector = &config.modifications[0].scope.path[0];
        assert!(selector.group.is_some());
        assert!(selector.name.is_some());
    }

    #[test]
    fn compiles_one_key_map_shorthand_with_attributes_block() {
        let yaml = r#"
modifications:
  - scope:
      path:
        - cell:
            attributes:
              power_pin: VDD
    action:
      operation: add
      mode: broadcast
      value: 0.1
"#;
        let config = compile_yaml_str(yaml).unwrap();
        let selector = &config.modifications[0].scope.path[0];
        assert!(selector.attributes.contains_key("power_pin"));
    }

    #[test]
    fn bare_path_array_scope_is_wrapped() {
        let yaml = r#"
modifications:
  - scope:
      - cell
      - pin
    action:
      operation: multiply
      mode: broadcast
      value: 1.0
"#;
        let config = compile_yaml_str(yaml).unwrap();
        assert_eq!(config.modifications[0].scope.path.len(), 2);
    }

    #[test]
    fn attrs_alias_conflicts_with_attributes() {
        let yaml = r#"
modifications:
  - scope:
      path:
        - group: cell
          attrs:
            power_pin: VDD
          attributes:
            power_pin: VDD
    action:
      operation: add
      mode: broadcast
      value: 0.1
"#;
        let err = compile_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigCompilerError::ConflictingAttributeAliases
        ));
    }

    #[test]
    fn rejects_non_mapping_root() {
        let err = compile_yaml_str("- just\n- a\n- list\n").unwrap_err();
        assert!(matches!(err, ConfigCompilerError::RootNotMapping));
    }
}
