//! Synchronous CLI dispatch for the `liberty` binary (§5, §6.2).
//!
//! Grounded on `rhai-cli/src/lib.rs`'s thin dispatcher struct; unlike the
//! teacher this is synchronous throughout; §5 mandates single-threaded,
//! non-suspending execution and there is no LSP server to keep alive.

pub mod args;
mod execute;
pub mod logging;

pub struct Liberty {
    pub colors: bool,
}

impl Liberty {
    #[must_use]
    pub fn new() -> Self {
        Self { colors: false }
    }

    pub fn execute(&mut self, args: args::LibertyArgs) -> Result<(), anyhow::Error> {
        self.colors = match args.color {
            args::Colors::Auto => atty::is(atty::Stream::Stderr),
            args::Colors::Always => true,
            args::Colors::Never => false,
        };

        match args.cmd {
            args::RootCommand::Format(cmd) => self.execute_format(cmd),
            args::RootCommand::Patch(cmd) => self.execute_patch(cmd),
            args::RootCommand::CompileConfig(cmd) => self.execute_compile_config(cmd),
        }
    }
}

impl Default for Liberty {
    fn default() -> Self {
        Self::new()
    }
}
