//! Record assembly.
//!
//! A [`RecordGenerator`] parses every directive of a schema once, up front,
//! then produces one JSON object per [`RecordGenerator::generate`] call.

use crate::clock::Clock;
use crate::generate::{generate_value, GenerateError};
use magicgen_core::{Directive, DirectiveError, Schema};
use rand::Rng;
use thiserror::Error;

/// One generated JSON object. Key order follows schema declaration order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Errors produced while building or running a record generator. The
/// failing field is always named; there is no partial-record recovery.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A schema field carries an invalid directive.
    #[error("field {field:?}: {source}")]
    Directive {
        field: String,
        #[source]
        source: DirectiveError,
    },

    /// Value generation failed for a field.
    #[error("field {field:?}: {source}")]
    Generate {
        field: String,
        #[source]
        source: GenerateError,
    },
}

/// Generates records for one schema.
pub struct RecordGenerator {
    fields: Vec<(String, Directive)>,
}

impl RecordGenerator {
    /// Parse every schema directive up front, failing fast on the first
    /// invalid one.
    ///
    /// Timestamp fields with an ignored rule are dropped from the field
    /// list here (the parser logs the warning), so they never appear in
    /// generated records.
    pub fn new(schema: &Schema) -> Result<Self, RecordError> {
        let mut fields = Vec::with_capacity(schema.len());
        for (name, raw) in schema.fields() {
            match Directive::parse(raw) {
                Ok(Some(directive)) => fields.push((name.to_string(), directive)),
                Ok(None) => {}
                Err(source) => {
                    return Err(RecordError::Directive {
                        field: name.to_string(),
                        source,
                    })
                }
            }
        }
        Ok(Self { fields })
    }

    /// Generate one record, walking fields in declaration order.
    pub fn generate<R: Rng, C: Clock>(&self, rng: &mut R, clock: &C) -> Result<Record, RecordError> {
        let mut record = Record::new();
        for (name, directive) in &self.fields {
            let value =
                generate_value(directive, rng, clock).map_err(|source| RecordError::Generate {
                    field: name.clone(),
                    source,
                })?;
            record.insert(name.clone(), value.into());
        }
        Ok(record)
    }

    /// Number of fields that will appear in each record.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
