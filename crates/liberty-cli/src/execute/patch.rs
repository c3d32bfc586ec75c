use anyhow::Context;

use liberty_patch::{hash_text, ArtifactRecord, BatchOp, JsonlProvenanceSink, ProvenanceSink};

use crate::args::PatchCommand;
use crate::Liberty;

use super::dump_parse_if_requested;

impl Liberty {
    pub fn execute_patch(&mut self, cmd: PatchCommand) -> Result<(), anyhow::Error> {
        let input_text = std::fs::read_to_string(&cmd.input)
            .with_context(|| format!("failed to read {}", cmd.input.display()))?;

        let mut parsed = liberty_syntax::parser::parse(&input_text)
            .with_context(|| format!("failed to parse {}", cmd.input.display()))?;

        dump_parse_if_requested(&parsed, cmd.dump_parse.as_deref())?;

        let config = load_config(&cmd.config)?;

        let batch_id = format!("batch-{}", uuid_like());
        let summary = liberty_patch::run(&mut parsed.root, &parsed.context, &config, batch_id.clone())
            .context("patch application failed")?;

        let options = liberty_fmt::Options {
            indent_size: cmd.indent_size,
        };
        let output_text = liberty_fmt::format_root(&parsed.root, &options)
            .with_context(|| format!("failed to format {}", cmd.input.display()))?;

        std::fs::write(&cmd.output, &output_text)
            .with_context(|| format!("failed to write {}", cmd.output.display()))?;

        tracing::info!(
            batch_id = %summary.batch_id,
            modified_groups = summary.modified_groups.len(),
            "patch applied",
        );

        if !cmd.db.is_empty() {
            log_provenance(&cmd, &config, &summary.batch_id, &input_text, &output_text)?;
        }

        Ok(())
    }
}

fn load_config(path: &std::path::Path) -> Result<liberty_patch::Config, anyhow::Error> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        liberty_config::compile_yaml_str(&text)
            .with_context(|| format!("failed to compile {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Invoked only when `cmd.db` is non-empty (§6.2: an empty `--db` disables
/// provenance entirely, so the CLI never constructs a sink for it).
fn log_provenance(
    cmd: &PatchCommand,
    config: &liberty_patch::Config,
    batch_id: &str,
    input_text: &str,
    output_text: &str,
) -> Result<(), anyhow::Error> {
    let mut sink = JsonlProvenanceSink::open(&cmd.db).context("failed to open provenance sink")?;

    let batch = BatchOp {
        batch_id: batch_id.to_string(),
        description: cmd.description.clone(),
        config_json: serde_json::to_value(config)?,
        expected_units: serde_json::to_value(&config.expected_units)?,
        timestamp: chrono::Utc::now(),
    };
    sink.log_batch(&batch)?;

    let artifact = ArtifactRecord {
        batch_id: batch_id.to_string(),
        file_path: cmd.output.display().to_string(),
        input_hash: hash_text(input_text),
        output_hash: hash_text(output_text),
        status: "ok".to_string(),
    };
    sink.log_artifacts(&[artifact])?;

    Ok(())
}

/// A process-local, non-cryptographic unique suffix for a generated
/// `batch_id` when the caller supplies none: the pid plus a monotonic
/// counter, not a wall-clock or RNG call (library code stays pure; only
/// this CLI boundary manufactures an identifier, per DESIGN.md).
fn uuid_like() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", std::process::id(), counter)
}
