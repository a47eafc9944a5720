//! Usage record type.

use serde_json::{Map, Value};

/// A single usage record.
///
/// Records are schema-free: every key the server sends is kept, with its
/// JSON value as-is. Nothing in the client interprets them.
pub type UsageRecord = Map<String, Value>;
