//! Core types for magicgen.
//!
//! This crate defines the schema model (field name → directive string) and
//! the `type:rule` directive mini-language, including its parser. Value and
//! record generation live in `magicgen-generator`; file output lives in
//! `magicgen-output`.

pub mod directive;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use directive::{DataType, Directive, DirectiveError, RANDOM_INT_MAX};
pub use schema::{Schema, SchemaError};
pub use value::{Literal, Value};
