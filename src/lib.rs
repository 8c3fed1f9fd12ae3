//! magicgen library surface.
//!
//! The binary wires three crates together: `magicgen-core` (schema and
//! directive parsing), `magicgen-generator` (value and record generation)
//! and `magicgen-output` (prefix naming and JSON-Lines batch writing).
//! This crate adds the config-file defaults layer and re-exports the types
//! the CLI needs.

pub mod config;

// Re-exports for convenience
pub use magicgen_core::{Schema, SchemaError};
pub use magicgen_generator::{RecordGenerator, SystemClock};
pub use magicgen_output::{BatchOutcome, BatchWriter, GenerationJob, PrefixStrategy};
