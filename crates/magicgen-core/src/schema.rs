//! Schema loading.
//!
//! A schema is a flat JSON object mapping field names to directive strings,
//! supplied either inline on the command line or as a path to a JSON file.
//! Field declaration order is preserved and drives output key order.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Error reading the schema file
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing JSON
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object
    #[error("schema must be a JSON object mapping field names to directive strings")]
    NotAnObject,

    /// A field maps to something other than a string
    #[error("schema field {field:?} must map to a directive string")]
    NonStringValue { field: String },
}

/// An ordered mapping from field name to raw directive string.
///
/// Directive strings are validated later, when a
/// `magicgen_generator::RecordGenerator` is built from the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<(String, String)>,
}

impl Schema {
    /// Parse a schema from inline JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let map = value.as_object().ok_or(SchemaError::NotAnObject)?;

        let mut fields = Vec::with_capacity(map.len());
        for (name, directive) in map {
            let directive = directive
                .as_str()
                .ok_or_else(|| SchemaError::NonStringValue {
                    field: name.clone(),
                })?;
            fields.push((name.clone(), directive.to_string()));
        }
        Ok(Self { fields })
    }

    /// Load a schema from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load a schema from a CLI argument: inline JSON if the text starts
    /// with `{`, otherwise a path to a JSON file.
    pub fn from_inline_or_file(arg: &str) -> Result<Self, SchemaError> {
        if arg.trim_start().starts_with('{') {
            Self::from_json_str(arg)
        } else {
            Self::from_file(Path::new(arg))
        }
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
