//! Subcommand handlers, grounded on `rhai-cli/src/execute/*.rs`'s one
//! file per subcommand split, mirrored here as three commands instead of
//! `rhai-cli`'s `fmt`/`config`/`lsp`.

mod compile_config;
mod format;
mod patch;

pub(crate) fn dump_parse_if_requested(
    parsed: &liberty_syntax::parser::ParseResult,
    dump_parse: Option<&std::path::Path>,
) -> Result<(), anyhow::Error> {
    use anyhow::Context;

    let Some(path) = dump_parse else {
        return Ok(());
    };

    let json =
        liberty_syntax::dump::to_json_pretty(parsed).context("failed to serialize parse dump")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
