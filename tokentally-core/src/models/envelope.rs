//! Response envelope for the usage endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use super::record::UsageRecord;

/// Outer wrapper of a usage response: `{"result": {"data": [...]}}`.
///
/// Unknown fields at either level are ignored. Both `result` and
/// `result.data` are required; a body missing either does not decode.
/// An explicit `"data": null` decodes as no records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageEnvelope {
    /// The `result` object.
    pub result: UsageResult,
}

/// Inner `result` object carrying the records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageResult {
    /// Records in server order.
    #[serde(deserialize_with = "null_as_empty")]
    pub data: Vec<UsageRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<UsageRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<UsageRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl UsageEnvelope {
    /// Wraps records in an envelope.
    pub fn new(data: Vec<UsageRecord>) -> Self {
        Self {
            result: UsageResult { data },
        }
    }

    /// Decodes an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON, or is JSON that does not
    /// have the `result.data` array-of-objects shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Returns the records without consuming the envelope.
    pub fn records(&self) -> &[UsageRecord] {
        &self.result.data
    }

    /// Consumes the envelope, returning its records.
    pub fn into_records(self) -> Vec<UsageRecord> {
        self.result.data
    }
}
