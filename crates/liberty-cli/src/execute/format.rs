use anyhow::Context;

use crate::args::FormatCommand;
use crate::Liberty;

use super::dump_parse_if_requested;

impl Liberty {
    pub fn execute_format(&mut self, cmd: FormatCommand) -> Result<(), anyhow::Error> {
        let source = std::fs::read_to_string(&cmd.input)
            .with_context(|| format!("failed to read {}", cmd.input.display()))?;

        let parsed = liberty_syntax::parser::parse(&source)
            .with_context(|| format!("failed to parse {}", cmd.input.display()))?;

        dump_parse_if_requested(&parsed, cmd.dump_parse.as_deref())?;

        let options = liberty_fmt::Options {
            indent_size: cmd.indent_size,
        };
        let formatted = liberty_fmt::format_root(&parsed.root, &options)
            .with_context(|| format!("failed to format {}", cmd.input.display()))?;

        std::fs::write(&cmd.output, formatted)
            .with_context(|| format!("failed to write {}", cmd.output.display()))?;

        tracing::info!(input = %cmd.input.display(), output = %cmd.output.display(), "formatted");
        Ok(())
    }
}
