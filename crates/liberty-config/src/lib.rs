//! Compiles the YAML source dialect (§6.3) into the normalized `Config`
//! the patch engine (`liberty-patch`) consumes (§4.7).

mod compiler;
mod error;

pub use compiler::{compile_value, compile_yaml_str, compile_yaml_str_with_export};
pub use error::ConfigCompilerError;
