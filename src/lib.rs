//! # Batch Signer
//!
//! A concurrent multi-stage pipeline that computes a combined hash
//! signature for a batch of integers.
//!
//! ## How it works
//! Values flow through a chain of bounded channels, one concurrent worker
//! per stage:
//! 1. **SingleHash** - per-value two-way fan-out over a checksum and a
//!    rate-limited digest, joined as `crc1~crc2`
//! 2. **MultiHash** - per-value six-way salted fan-out, concatenated in
//!    salt order
//! 3. **CombineResults** - drains everything, sorts, joins with `_`
//!
//! The final output is deterministic for a given input batch even though
//! the inner stages emit in whatever order their workers finish.
//!
//! ## Architecture
//! The library is split into a core engine and presentation layers:
//! - `core` - primitives, stages, and the pipeline executor
//! - `events` - event-driven progress reporting
//! - `error` - error types for the configuration and input edges
//! - `cli` - command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SignerError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
