use anyhow::Context;

use crate::args::CompileConfigCommand;
use crate::Liberty;

impl Liberty {
    pub fn execute_compile_config(&mut self, cmd: CompileConfigCommand) -> Result<(), anyhow::Error> {
        let yaml_text = std::fs::read_to_string(&cmd.input)
            .with_context(|| format!("failed to read {}", cmd.input.display()))?;

        liberty_config::compile_yaml_str_with_export(&yaml_text, Some(&cmd.output))
            .with_context(|| format!("failed to compile {}", cmd.input.display()))?;

        tracing::info!(input = %cmd.input.display(), output = %cmd.output.display(), "compiled config");
        Ok(())
    }
}
