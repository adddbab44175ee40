//! # Error Module
//!
//! Error types for the edges of the signing pipeline.
//!
//! ## Design Principles
//! - **Never panic on user input** - bad CLI values come back as errors
//! - **Include context** - the offending token, the rejected setting
//! - Inside the pipeline itself there is deliberately no error channel:
//!   a stage contract violation aborts the worker and the executor
//!   re-raises it in the caller. Only the configuration and input edges
//!   speak `Result`.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Source(#[from] SourceError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Errors produced while validating pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Channel capacity must be at least 1, got {value}")]
    ZeroCapacity { value: usize },
}

/// Errors produced while reading input values
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Not an integer: {token:?}")]
    InvalidNumber { token: String },

    #[error("Failed to read values from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced after a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Pipeline finished without emitting a combined result")]
    MissingResult,
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SignerError>;
