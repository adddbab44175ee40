//! # Core Module
//!
//! The signing engine, independent of any front-end.
//!
//! ## Modules
//! - `primitives` - the checksum and rate-limited digest functions
//! - `stages` - the SingleHash, MultiHash, and CombineResults stages
//! - `pipeline` - the generic executor and the `SignerPipeline` facade

pub mod pipeline;
pub mod primitives;
pub mod stages;

// Re-export commonly used types
pub use pipeline::{SignatureReport, SignerPipeline};
pub use primitives::{checksum32, SerialMd5};
pub use stages::Item;
