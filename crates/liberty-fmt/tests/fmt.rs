use liberty_fmt::{format_source, Options};

fn format(src: &str) -> String {
    format_source(src, &Options::default()).expect("should format")
}

#[test]
fn formats_nested_library_with_indentation() {
    let out = format("library(example) {\ncell(INVX1) {\narea : 1.5;\n}\n}");
    assert!(out.contains("library(example) {\n"));
    assert!(out.contains("  cell(INVX1) {\n"));
    assert!(out.contains("    area : 1.5;\n"));
}

#[test]
fn preserves_colon_form_matrix_delimiter() {
    let src = "cell(A) { index_1 : 0.1, 0.2; index_2 : 1, 2; values : \"1,2\" \\\n \"3,4\"; }";
    let out = format(src);
    assert!(out.contains("values : \\\n"));
    assert!(!out.contains("values ( "));
}

#[test]
fn round_trip_is_idempotent_for_several_samples() {
    let samples = [
        "library(test) {\n  time_unit : \"1ns\";\n}",
        "cell(A) { rise_capacitance_range (0.276893, 0.440626); }",
        "cell(A) { index_1 : 0.1, 0.2, 0.3; values ( 1,2,3 ); }",
        "cell(A) { index_1 : 0.1, 0.2; index_2 : 1, 2; values ( \"1,2\" \\\n \"3,4\" ); }",
    ];

    for src in samples {
        let once = format(src);
        let twice = format(&once);
        assert_eq!(once, twice, "formatting should be idempotent for {src:?}");
    }
}
