// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TokenTally` Fetch
//!
//! Fetches usage records from a `TokenTally` server.
//!
//! A fetch is a single `GET {base_url}/api/trpc/usage`, retried with
//! exponential backoff on transport errors and non-200 statuses. A 200 whose
//! body is not a `{"result": {"data": [...]}}` envelope fails immediately.
//!
//! - [`client::UsageClient`] - The fetcher
//! - [`retry::RetryPolicy`] - Attempt count and backoff schedule
//! - [`config::ClientConfig`] - File-backed client settings
//! - [`error::FetchError`] - Failure taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use tokentally_fetch::{RetryPolicy, UsageClient};
//!
//! let client = UsageClient::builder()
//!     .retry_policy(RetryPolicy::default())
//!     .build()?;
//!
//! let records = client.get_usage("http://localhost:3000").await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::{
    get_usage, usage_url, BoundUsageClient, UsageClient, UsageClientBuilder, USAGE_PATH,
};
pub use config::ClientConfig;
pub use error::FetchError;
pub use retry::RetryPolicy;

pub use tokio_util::sync::CancellationToken;
