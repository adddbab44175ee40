//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the signing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Per-stage events
    Stage(StageEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// The stages of the signing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    Source,
    SingleHash,
    MultiHash,
    Combine,
}

/// Events emitted by an individual stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageEvent {
    /// The stage worker has started receiving
    Started { stage: StageKind },
    /// One item finished processing in this stage
    ItemCompleted { stage: StageKind, completed: usize },
    /// The stage drained its input and closed its output
    Completed { stage: StageKind, emitted: usize },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started with this many input values
    Started { items: usize },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Number of input values signed
    pub items: usize,
    /// Length of the combined signature in bytes
    pub signature_len: usize,
    /// Number of digest overheats observed (0 in a correct run)
    pub md5_overheats: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Source => write!(f, "Source"),
            StageKind::SingleHash => write!(f, "SingleHash"),
            StageKind::MultiHash => write!(f, "MultiHash"),
            StageKind::Combine => write!(f, "CombineResults"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Stage(StageEvent::ItemCompleted {
            stage: StageKind::MultiHash,
            completed: 50,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Stage(StageEvent::ItemCompleted { completed, .. }) => {
                assert_eq!(completed, 50);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn pipeline_summary_is_serializable() {
        let summary = PipelineSummary {
            items: 1000,
            signature_len: 48_000,
            md5_overheats: 0,
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("48000"));
    }

    #[test]
    fn stage_kind_display() {
        assert_eq!(StageKind::SingleHash.to_string(), "SingleHash");
        assert_eq!(StageKind::Combine.to_string(), "CombineResults");
    }
}
