//! # Pipeline Module
//!
//! Orchestrates the signing workflow.
//!
//! ## Pipeline Stages
//! 1. **Source** - emits the input values
//! 2. **SingleHash** - per-value checksum + serialized digest
//! 3. **MultiHash** - per-value six-way salted fan-out
//! 4. **CombineResults** - sort and join into one signature
//!
//! ## Layers
//! - [`executor`] - the generic channel-wiring machinery, usable with
//!   any stage chain
//! - [`SignerPipeline`] - the batteries-included facade that assembles
//!   the four stages above

pub mod executor;

mod signer;

pub use executor::{closed_source, execute, run_stages, StageFn, DEFAULT_CHANNEL_CAPACITY};
pub use signer::{SignatureReport, SignerPipeline, SignerPipelineBuilder};
