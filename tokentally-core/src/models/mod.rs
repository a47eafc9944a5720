//! Data model for the usage endpoint.
//!
//! - [`record`] - The opaque [`UsageRecord`] mapping
//! - [`envelope`] - The response wrapper ([`UsageEnvelope`], [`UsageResult`])

mod envelope;
mod record;

pub use envelope::{UsageEnvelope, UsageResult};
pub use record::UsageRecord;
