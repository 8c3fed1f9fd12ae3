//! Value and record generation for magicgen.
//!
//! [`generate_value`] turns one parsed [`magicgen_core::Directive`] into a
//! concrete value; [`RecordGenerator`] applies it across a whole schema to
//! build one JSON record per call.
//!
//! Both the random number generator and the clock are injected so that
//! tests can pin them:
//!
//! ```rust
//! use magicgen_core::Schema;
//! use magicgen_generator::{FixedClock, RecordGenerator};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let schema = Schema::from_json_str(r#"{"number": "int:rand"}"#).unwrap();
//! let generator = RecordGenerator::new(&schema).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let record = generator.generate(&mut rng, &FixedClock(12345.0)).unwrap();
//! assert!(record["number"].is_i64());
//! ```

pub mod clock;
pub mod generate;
pub mod record;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use generate::{generate_value, uuid_v4, GenerateError};
pub use record::{Record, RecordError, RecordGenerator};
