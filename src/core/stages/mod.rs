//! # Stages Module
//!
//! The three signing stages, one per file, plus the item type that flows
//! between them.
//!
//! ## Stage contract
//! Every stage is a [`StageFn`](crate::core::pipeline::StageFn) built by
//! a constructor here. Constructors capture whatever the stage needs -
//! the serialized digest handle, an event sender - so the executor stays
//! generic.

mod combine;
mod multi_hash;
mod single_hash;

pub use combine::combine_results;
pub use multi_hash::{multi_hash, SALT_COUNT};
pub use single_hash::single_hash;

use crate::core::pipeline::StageFn;
use crate::events::{Event, EventSender, StageEvent, StageKind};

/// One value flowing through the pipeline.
///
/// The channel between the source and SingleHash carries numbers; every
/// channel after that carries signatures. A stage receiving the wrong
/// variant is a wiring bug, not a runtime condition - the accessors abort
/// the worker rather than paper over it, and the executor re-raises the
/// fault in the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A raw input value, pre-hashing
    Number(i64),
    /// A signature produced by one of the hashing stages
    Signature(String),
}

impl Item {
    /// Unwrap a number, aborting the worker on a signature.
    pub fn into_number(self) -> i64 {
        match self {
            Item::Number(value) => value,
            Item::Signature(s) => panic!("expected a number item, got signature {s:?}"),
        }
    }

    /// Unwrap a signature, aborting the worker on a number.
    pub fn into_signature(self) -> String {
        match self {
            Item::Signature(value) => value,
            Item::Number(n) => panic!("expected a signature item, got number {n}"),
        }
    }
}

/// Build the source stage: emits each value as an [`Item::Number`] and
/// closes its output.
///
/// The source ignores its input channel entirely, which is what lets the
/// executor hand it a synthesized, already-closed channel 0.
pub fn number_source(values: Vec<i64>, events: EventSender) -> StageFn<Item> {
    Box::new(move |_input, output| {
        events.send(Event::Stage(StageEvent::Started {
            stage: StageKind::Source,
        }));
        let mut emitted = 0;
        for value in values {
            if output.send(Item::Number(value)).is_err() {
                break;
            }
            emitted += 1;
        }
        events.send(Event::Stage(StageEvent::Completed {
            stage: StageKind::Source,
            emitted,
        }));
    })
}
