use liberty_config::compile_yaml_str;
use liberty_patch::Pattern;

#[test]
fn expands_multi_step_path_shorthand() {
    let yaml = r#"
modifications:
  - scope:
      path:
        - cell: "AND*"
        - timing:
            attributes:
              related_pin: "A"
    action:
      operation: multiply
      mode: broadcast
      value: 1.1
"#;
    let config = compile_yaml_str(yaml).unwrap();
    let path = &config.modifications[0].scope.path;
    assert!(matches!(&path[0].group, Some(Pattern::Glob(g)) if g == "cell"));
    assert!(matches!(&path[0].name, Some(Pattern::Glob(n)) if n == "AND*"));
    assert!(matches!(&path[1].group, Some(Pattern::Glob(g)) if g == "timing"));
    assert!(matches!(
        path[1].attributes.get("related_pin"),
        Some(Pattern::Glob(p)) if p == "A"
    ));
}

#[test]
fn supports_attrs_alias_at_top_level_selector() {
    let yaml = r#"
modifications:
  - scope:
      path:
        - group: timing
          attrs:
            timing_type: "combinational"
    action:
      operation: add
      mode: broadcast
      value: 0.5
"#;
    let config = compile_yaml_str(yaml).unwrap();
    let selector = &config.modifications[0].scope.path[0];
    assert!(matches!(
        selector.attributes.get("timing_type"),
        Some(Pattern::Glob(t)) if t == "combinational"
    ));
}

#[test]
fn compiled_config_round_trips_through_json() {
    let yaml = r#"
expected_units:
  time_unit: "1ns"
modifications:
  - scope:
      path:
        - cell
    action:
      operation: multiply
      mode: broadcast
      value: 2.0
"#;
    let config = compile_yaml_str(yaml).unwrap();
    assert_eq!(config.expected_units.time_unit.as_deref(), Some("1ns"));
    let json = serde_json::to_string(&config).unwrap();
    let back: liberty_patch::Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.modifications.len(), 1);
}
