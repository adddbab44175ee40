//! MultiHash stage implementation.
//!
//! For each incoming signature, six salted checksums are computed
//! concurrently, one per salt digit 0..6. Each sub-worker writes into a
//! fixed-position slot, so the concatenation comes out in salt order no
//! matter which sub-worker finishes first.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::Item;
use crate::core::pipeline::StageFn;
use crate::core::primitives::checksum32;
use crate::events::{Event, EventSender, StageEvent, StageKind};

/// Number of salts each signature is hashed with.
pub const SALT_COUNT: usize = 6;

/// Build the MultiHash stage.
///
/// Same discipline as SingleHash: one worker per in-flight item, a
/// six-way fan-out inside each worker, and a stage-level join before the
/// output channel closes.
pub fn multi_hash(events: EventSender) -> StageFn<Item> {
    Box::new(move |input, output| {
        events.send(Event::Stage(StageEvent::Started {
            stage: StageKind::MultiHash,
        }));
        let completed = AtomicUsize::new(0);

        thread::scope(|workers| {
            for item in input.iter() {
                let signature = item.into_signature();
                let out = output.clone();
                let events = &events;
                let completed = &completed;

                workers.spawn(move || {
                    let mut slots: [String; SALT_COUNT] = Default::default();

                    thread::scope(|subs| {
                        for (salt, slot) in slots.iter_mut().enumerate() {
                            let signature = signature.as_str();
                            subs.spawn(move || {
                                *slot = checksum32(&format!("{salt}{signature}"));
                            });
                        }
                    });

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    events.send(Event::Stage(StageEvent::ItemCompleted {
                        stage: StageKind::MultiHash,
                        completed: done,
                    }));
                    let _ = out.send(Item::Signature(slots.concat()));
                });
            }
        });

        events.send(Event::Stage(StageEvent::Completed {
            stage: StageKind::MultiHash,
            emitted: completed.into_inner(),
        }));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::execute;
    use crate::events::null_sender;

    fn signature_source(signatures: Vec<&str>) -> StageFn<Item> {
        let owned: Vec<String> = signatures.into_iter().map(String::from).collect();
        Box::new(move |_input, output| {
            for signature in owned {
                let _ = output.send(Item::Signature(signature));
            }
        })
    }

    fn run_multi_hash(signatures: Vec<&str>) -> Vec<String> {
        let sink = execute(vec![signature_source(signatures), multi_hash(null_sender())]);
        sink.iter().map(Item::into_signature).collect()
    }

    #[test]
    fn slots_are_ordered_by_salt() {
        let results = run_multi_hash(vec!["abc"]);

        let expected: String = (0..SALT_COUNT)
            .map(|salt| checksum32(&format!("{salt}abc")))
            .collect();
        assert_eq!(results, vec![expected]);
    }

    #[test]
    fn result_decomposes_into_fixed_width_slots() {
        let results = run_multi_hash(vec!["some~signature"]);
        let combined = &results[0];

        // Six fixed-width checksums, positionally recoverable
        assert_eq!(combined.len(), SALT_COUNT * 8);
        for (salt, chunk) in combined.as_bytes().chunks(8).enumerate() {
            let chunk = std::str::from_utf8(chunk).unwrap();
            assert_eq!(chunk, checksum32(&format!("{salt}some~signature")));
        }
    }

    #[test]
    fn every_input_produces_one_result() {
        let inputs: Vec<String> = (0..30).map(|i| format!("sig-{i}")).collect();
        let results = run_multi_hash(inputs.iter().map(String::as_str).collect());
        assert_eq!(results.len(), 30);
    }

    #[test]
    fn distinct_inputs_produce_distinct_results() {
        let mut results = run_multi_hash(vec!["a", "b"]);
        results.sort();
        results.dedup();
        assert_eq!(results.len(), 2);
    }
}
