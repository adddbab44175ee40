//! The high-level signing pipeline facade.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::executor::{self, StageFn, DEFAULT_CHANNEL_CAPACITY};
use crate::core::primitives::SerialMd5;
use crate::core::stages::{combine_results, multi_hash, number_source, single_hash, Item};
use crate::error::{ConfigError, PipelineError, Result};
use crate::events::{null_sender, Event, EventSender, PipelineEvent, PipelineSummary};

/// Result of a signing run
#[derive(Debug, Clone)]
pub struct SignatureReport {
    /// The combined signature for the whole batch
    pub combined: String,
    /// Number of input values signed
    pub items: usize,
    /// Digest overheats observed during this run (0 in a correct run)
    pub md5_overheats: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SignatureReport {
    /// The event-facing summary of this report
    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            items: self.items,
            signature_len: self.combined.len(),
            md5_overheats: self.md5_overheats,
            duration_ms: self.duration_ms,
        }
    }
}

/// Builder for the signing pipeline
pub struct SignerPipelineBuilder {
    capacity: usize,
    md5_latency: Duration,
}

impl SignerPipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
            md5_latency: Duration::ZERO,
        }
    }

    /// Set the capacity of the channels between stages
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Simulate a per-call latency on the digest primitive
    ///
    /// Handy for demonstrating what the serialization costs, and for
    /// perturbing worker schedules when testing determinism.
    pub fn md5_latency(mut self, latency: Duration) -> Self {
        self.md5_latency = latency;
        self
    }

    /// Build the pipeline, validating the configuration
    pub fn build(self) -> std::result::Result<SignerPipeline, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                value: self.capacity,
            });
        }
        Ok(SignerPipeline {
            capacity: self.capacity,
            md5: Arc::new(SerialMd5::with_latency(self.md5_latency)),
        })
    }
}

impl Default for SignerPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The batch signing pipeline
pub struct SignerPipeline {
    capacity: usize,
    md5: Arc<SerialMd5>,
}

impl SignerPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> SignerPipelineBuilder {
        SignerPipelineBuilder::new()
    }

    /// Sign a batch without progress reporting
    pub fn run(&self, values: &[i64]) -> Result<SignatureReport> {
        self.run_with_events(values, &null_sender())
    }

    /// Sign a batch, emitting progress events along the way
    pub fn run_with_events(&self, values: &[i64], events: &EventSender) -> Result<SignatureReport> {
        let start = Instant::now();
        let overheats_before = self.md5.overheats();

        events.send(Event::Pipeline(PipelineEvent::Started {
            items: values.len(),
        }));

        let stages: Vec<StageFn<Item>> = vec![
            number_source(values.to_vec(), events.clone()),
            single_hash(Arc::clone(&self.md5), events.clone()),
            multi_hash(events.clone()),
            combine_results(events.clone()),
        ];

        // Blocks until every stage worker has joined; the single combined
        // value is waiting in the final channel's buffer afterwards
        let sink = executor::run_stages(executor::closed_source(), stages, self.capacity);
        let combined = sink
            .recv()
            .map_err(|_| PipelineError::MissingResult)?
            .into_signature();

        let report = SignatureReport {
            combined,
            items: values.len(),
            md5_overheats: self.md5.overheats() - overheats_before,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        tracing::debug!(
            items = report.items,
            signature_len = report.combined.len(),
            "batch signed"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: report.summary(),
        }));
        Ok(report)
    }
}
