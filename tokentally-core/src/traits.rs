//! Trait definitions for `TokenTally`.

use crate::models::UsageRecord;

/// Something that can produce usage records.
///
/// The HTTP client implements this for a fixed base URL; front ends are
/// written against the trait so they do not depend on the transport.
pub trait UsageSource: Send + Sync {
    /// Error returned when records cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short human-readable description of where records come from.
    fn describe(&self) -> String;

    /// Fetches the current usage records, in source order.
    fn fetch_records(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<UsageRecord>, Self::Error>> + Send;
}
