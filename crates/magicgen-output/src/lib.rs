//! File output for magicgen.
//!
//! Turns a [`GenerationJob`] into JSON-Lines files (or a single previewed
//! record when no files are requested), naming multi-file batches with a
//! [`PrefixStrategy`].

pub mod error;
pub mod prefix;
pub mod writer;

// Re-exports for convenience
pub use error::OutputError;
pub use prefix::{create_prefixes, PrefixStrategy};
pub use writer::{clear_matching_files, BatchOutcome, BatchWriter, GenerationJob};
