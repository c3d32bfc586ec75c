//! Canonical re-emission of a Liberty CST back to text (§4.3).

mod error;
mod format;
mod options;

pub use error::FormatterError;
pub use format::format_root;
pub use options::Options;

use liberty_syntax::parser::parse;

/// Parses `source` and re-emits it in canonical form in one step, mirroring
/// `rhai-fmt`'s `format_source` convenience entry point.
pub fn format_source(source: &str, options: &Options) -> Result<String, Error> {
    let parsed = parse(source)?;
    Ok(format_root(&parsed.root, options)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] liberty_syntax::parser::Error),
    #[error(transparent)]
    Format(#[from] FormatterError),
}
