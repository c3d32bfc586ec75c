//! Write-only provenance sink (§4.8), grounded on
//! `examples/original_source/provenance/db.py`'s two-table shape (§6.5).
//!
//! The original writes directly to sqlite; this crate only defines the
//! sink boundary (`ProvenanceSink`) and ships two implementations: a no-op
//! and an append-only JSONL reference sink that mirrors the two tables as
//! two sibling files. A relational-store-backed sink can implement the
//! same trait without the patch runner knowing the difference.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProvenanceError;

/// `batch_ops` row (§6.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOp {
    pub batch_id: String,
    pub description: String,
    pub config_json: serde_json::Value,
    pub expected_units: serde_json::Value,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// `artifacts` row (§6.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub batch_id: String,
    pub file_path: String,
    pub input_hash: String,
    pub output_hash: String,
    pub status: String,
}

pub trait ProvenanceSink {
    fn log_batch(&mut self, batch: &BatchOp) -> Result<(), ProvenanceError>;
    fn log_artifacts(&mut self, artifacts: &[ArtifactRecord]) -> Result<(), ProvenanceError>;
}

/// Used when provenance is disabled (`--db ""`, §6.2).
#[derive(Debug, Default)]
pub struct NullProvenanceSink;

impl ProvenanceSink for NullProvenanceSink {
    fn log_batch(&mut self, _batch: &BatchOp) -> Result<(), ProvenanceError> {
        Ok(())
    }

    fn log_artifacts(&mut self, _artifacts: &[ArtifactRecord]) -> Result<(), ProvenanceError> {
        Ok(())
    }
}

/// Append-only JSONL reference sink: one `batch_ops.jsonl` and one
/// `artifacts.jsonl` file per `dir`, each record serialized as one line of
/// JSON. Creates `dir` if needed; never reads or deletes (§4.8).
#[derive(Debug)]
pub struct JsonlProvenanceSink {
    batch_ops: File,
    artifacts: File,
}

impl JsonlProvenanceSink {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ProvenanceError> {
        let dir: PathBuf = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let batch_ops = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("batch_ops.jsonl"))?;
        let artifacts = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("artifacts.jsonl"))?;

        Ok(Self {
            batch_ops,
            artifacts,
        })
    }
}

impl ProvenanceSink for JsonlProvenanceSink {
    fn log_batch(&mut self, batch: &BatchOp) -> Result<(), ProvenanceError> {
        writeln!(self.batch_ops, "{}", serde_json::to_string(batch)?)?;
        self.batch_ops.flush()?;
        Ok(())
    }

    fn log_artifacts(&mut self, artifacts: &[ArtifactRecord]) -> Result<(), ProvenanceError> {
        for artifact in artifacts {
            writeln!(self.artifacts, "{}", serde_json::to_string(artifact)?)?;
        }
        self.artifacts.flush()?;
        Ok(())
    }
}

/// SHA-256 hex digest of `text`, used for the `input_hash`/`output_hash`
/// fields of an [`ArtifactRecord`] (§4.6).
#[must_use]
pub fn hash_text(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_never_errors() {
        let mut sink = NullProvenanceSink;
        let batch = BatchOp {
            batch_id: "b1".into(),
            description: "test".into(),
            config_json: serde_json::json!({}),
            expected_units: serde_json::json!({}),
            timestamp: chrono::Utc::now(),
        };
        assert!(sink.log_batch(&batch).is_ok());
        assert!(sink.log_artifacts(&[]).is_ok());
    }

    #[test]
    fn jsonl_sink_appends_one_line_per_record() {
        let dir = std::env::temp_dir().join(format!("liberty-patch-test-{}", std::process::id()));
        let mut sink = JsonlProvenanceSink::open(&dir).unwrap();

        let batch = BatchOp {
            batch_id: "b1".into(),
            description: "test run".into(),
            config_json: serde_json::json!({"modifications": []}),
            expected_units: serde_json::json!({}),
            timestamp: chrono::Utc::now(),
        };
        sink.log_batch(&batch).unwrap();

        let artifact = ArtifactRecord {
            batch_id: "b1".into(),
            file_path: "out.lib".into(),
            input_hash: hash_text("a"),
            output_hash: hash_text("b"),
            status: "ok".into(),
        };
        sink.log_artifacts(&[artifact]).unwrap();

        let batch_ops_text = fs::read_to_string(dir.join("batch_ops.jsonl")).unwrap();
        assert_eq!(batch_ops_text.lines().count(), 1);
        let artifacts_text = fs::read_to_string(dir.join("artifacts.jsonl")).unwrap();
        assert_eq!(artifacts_text.lines().count(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn hash_text_is_sha256_hex() {
        let digest = hash_text("");
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(digest.len(), 64);
    }
}
