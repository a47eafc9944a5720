// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TokenTally` Core
//!
//! Core types and traits for the `TokenTally` usage client.
//!
//! The usage endpoint returns loosely-typed records wrapped in a fixed
//! two-level envelope. This crate owns that wire shape and the trait
//! through which callers obtain records, independent of transport.
//!
//! ## Key Types
//!
//! - [`UsageRecord`] - Schema-free record, passed through untouched
//! - [`UsageEnvelope`] - The `{"result": {"data": [...]}}` wrapper
//! - [`UsageSource`] - Anything that can yield usage records

pub mod models;
pub mod traits;

pub use models::{UsageEnvelope, UsageRecord, UsageResult};
pub use traits::UsageSource;
