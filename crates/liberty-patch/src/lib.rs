//! The patch engine: scope resolution, the matrix codec, unit validation,
//! the patch runner driver, and the provenance sink boundary (§4.4-§4.8).
//!
//! Depends on `liberty-syntax` for the CST it mutates in place; knows
//! nothing about the textual form `liberty-fmt` later re-emits.

pub mod config;
pub mod error;
pub mod matrix;
pub mod provenance;
pub mod runner;
pub mod scope;
pub mod units;

pub use config::{Action, ActionValue, Config, Modification, Scope};
pub use error::PatchError;
pub use provenance::{hash_text, ArtifactRecord, BatchOp, JsonlProvenanceSink, NullProvenanceSink, ProvenanceSink};
pub use runner::{run, PatchSummary};
pub use scope::{Pattern, Selector};
pub use units::UnitExpectations;
