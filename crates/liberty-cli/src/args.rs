//! CLI argument surface (§6.2), grounded on `rhai-cli/src/args.rs`'s shape
//! (global flags + a subcommand enum), modernized to clap 4's derive
//! `ValueEnum` in place of `rhai-cli`'s clap 3 `ArgEnum`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Clone, Parser)]
#[command(name = "liberty")]
#[command(bin_name = "liberty")]
#[command(version)]
pub struct LibertyArgs {
    #[arg(long, value_enum, global = true, default_value = "auto")]
    pub color: Colors,
    /// Enable a verbose logging format.
    #[arg(long, global = true)]
    pub verbose: bool,
    /// Enable logging spans.
    #[arg(long, global = true)]
    pub log_spans: bool,
    #[command(subcommand)]
    pub cmd: RootCommand,
}

#[derive(Clone, Subcommand)]
pub enum RootCommand {
    /// Re-emit a Liberty file in canonical form.
    Format(FormatCommand),
    /// Apply a patch configuration to a Liberty file.
    Patch(PatchCommand),
    /// Compile a YAML patch config into the normalized JSON form.
    CompileConfig(CompileConfigCommand),
}

#[derive(Clone, clap::Args)]
pub struct FormatCommand {
    /// Input Liberty file.
    #[arg(long)]
    pub input: PathBuf,
    /// Output Liberty file.
    #[arg(long)]
    pub output: PathBuf,
    /// Formatter indentation size.
    #[arg(long, default_value_t = 2)]
    pub indent_size: usize,
    /// Optional JSON path to dump the parsed CST.
    #[arg(long)]
    pub dump_parse: Option<PathBuf>,
}

#[derive(Clone, clap::Args)]
pub struct PatchCommand {
    /// Input Liberty file.
    #[arg(long)]
    pub input: PathBuf,
    /// Output Liberty file.
    #[arg(long)]
    pub output: PathBuf,
    /// Patch config file (JSON or YAML, by extension).
    #[arg(long)]
    pub config: PathBuf,
    /// Free-text description stored alongside the provenance batch record.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Formatter indentation size.
    #[arg(long, default_value_t = 2)]
    pub indent_size: usize,
    /// Provenance sink directory; empty string disables provenance.
    #[arg(long, default_value = "")]
    pub db: String,
    /// Optional JSON path to dump the parsed CST.
    #[arg(long)]
    pub dump_parse: Option<PathBuf>,
}

#[derive(Clone, clap::Args)]
pub struct CompileConfigCommand {
    /// Input YAML config file.
    #[arg(long)]
    pub input: PathBuf,
    /// Output JSON config file.
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Colors {
    /// Determine whether to colorize output automatically.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}
