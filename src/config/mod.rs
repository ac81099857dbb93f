//! Configuration structures and loading utilities.
//!
//! Every configuration struct has a `Default` and a `from_env()` constructor
//! that falls back to the defaults for unset or unparsable variables.

pub mod client;
pub mod metrics;
pub mod telemetry;

pub use client::*;
pub use metrics::*;
pub use telemetry::*;
