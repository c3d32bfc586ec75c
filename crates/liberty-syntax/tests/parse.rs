use liberty_syntax::{parse, Node, TokenKind};

#[test]
fn parses_nested_library() {
    let src = r#"
library(example) {
    time_unit : "1ns";
    voltage_unit : "1v";

    cell(INVX1) {
        area : 1.5;
        pin(A) {
            direction : input;
        }
        pin(Y) {
            direction : output;
            rise_capacitance_range (0.276893, 0.440626);
        }
    }
}
"#;

    let parsed = parse(src).expect("valid liberty source should parse");
    assert_eq!(parsed.context.time_unit.as_deref(), Some("1ns"));
    assert_eq!(parsed.context.voltage_unit.as_deref(), Some("1v"));

    let library = parsed.root.children[0].as_group().unwrap();
    let cell = library
        .children
        .iter()
        .find_map(|n| match n {
            Node::Group(g) if g.name.lexeme == "cell" => Some(g),
            _ => None,
        })
        .unwrap();

    assert_eq!(cell.first_arg(), Some("INVX1"));

    let pins: Vec<_> = cell
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Group(g) if g.name.lexeme == "pin" => Some(g),
            _ => None,
        })
        .collect();
    assert_eq!(pins.len(), 2);

    let pin_y = pins.iter().find(|p| p.first_arg() == Some("Y")).unwrap();
    let attr = pin_y.find_attribute("rise_capacitance_range").unwrap();
    assert!(attr.use_parens);
    assert!(attr.raw.iter().any(|t| t.kind == TokenKind::Ident && t.lexeme == "0.276893"));
}

#[test]
fn handles_comments_interleaved_with_groups() {
    let src = "// top comment\nlibrary(test) {\n  // inner comment\n  time_unit : \"1ns\";\n}";
    let parsed = parse(src).unwrap();
    assert!(matches!(parsed.root.children[0], Node::Comment(_)));
}

#[test]
fn rejects_unterminated_group() {
    let err = parse("library(test) {\n  cell(A) {\n}").unwrap_err();
    assert!(format!("{err}").contains("unexpected end of input") || format!("{err}").contains("parse error"));
}
