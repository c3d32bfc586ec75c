//! JSON parse-dump serialization (§6.4), a debugging interface only: not a
//! committed external schema.

use serde::Serialize;
use serde_json::Error as JsonError;

use crate::parser::ParseResult;

#[derive(Serialize)]
struct Dump<'a> {
    context: &'a crate::cst::LibraryContext,
    root: &'a crate::cst::RootNode,
}

/// Serializes a [`ParseResult`] to pretty-printed JSON.
pub fn to_json_pretty(result: &ParseResult) -> Result<String, JsonError> {
    let dump = Dump {
        context: &result.context,
        root: &result.root,
    };
    serde_json::to_string_pretty(&dump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn dumps_valid_json() {
        let parsed = parse("library(test) {\n  time_unit : \"1ns\";\n}").unwrap();
        let json = to_json_pretty(&parsed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["context"]["time_unit"], "1ns");
        assert_eq!(value["root"]["type"], "root");
    }
}
