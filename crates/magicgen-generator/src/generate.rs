//! Value generation for parsed directives.

use crate::clock::Clock;
use magicgen_core::{Directive, Value, RANDOM_INT_MAX};
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced while generating a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// A `rand(a, b)` rule with reversed bounds.
    #[error("invalid range: rand({min}, {max}) requires min <= max")]
    InvalidRange { min: i64, max: i64 },
}

/// Produce one concrete value for a directive.
///
/// Pure apart from the injected RNG and clock: static, null and
/// empty-string directives return the same value on every call.
pub fn generate_value<R: Rng>(
    directive: &Directive,
    rng: &mut R,
    clock: &impl Clock,
) -> Result<Value, GenerateError> {
    let value = match directive {
        Directive::CurrentTime => Value::Float(clock.epoch_secs()),

        Directive::RandomUuid => Value::Str(uuid_v4(rng).to_string()),

        Directive::RandomInt => Value::Int(rng.gen_range(0..=RANDOM_INT_MAX)),

        Directive::OneOf(literals) => {
            // The parser rejects empty lists.
            let idx = rng.gen_range(0..literals.len());
            Value::from(&literals[idx])
        }

        Directive::IntRange { min, max } => {
            if min > max {
                return Err(GenerateError::InvalidRange {
                    min: *min,
                    max: *max,
                });
            }
            Value::Int(rng.gen_range(*min..=*max))
        }

        Directive::Static(literal) => Value::from(literal),

        Directive::Null => Value::Null,

        Directive::EmptyString => Value::Str(String::new()),
    };
    Ok(value)
}

/// Generate a UUID v4 from the provided RNG, so seeded runs reproduce.
pub fn uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}
