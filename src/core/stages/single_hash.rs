//! SingleHash stage implementation.
//!
//! For each number n, two sub-hashes are computed concurrently:
//! 1. `crc1 = checksum32(n)` - free to run any time
//! 2. `crc2 = checksum32(md5(n))` - the digest goes through the
//!    serialized handle; the follow-up checksum runs after the digest
//!    lock is released, since it only depends on the digest's output
//!
//! Both must finish before the item's signature `crc1~crc2` is emitted.
//! Items are processed with one worker per in-flight item, so emission
//! order across items is whatever order the workers finish in.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use super::Item;
use crate::core::pipeline::StageFn;
use crate::core::primitives::{checksum32, SerialMd5};
use crate::events::{Event, EventSender, StageEvent, StageKind};

/// Build the SingleHash stage.
///
/// The stage spawns one worker per incoming item and joins them all
/// before returning, which is what closes its output channel.
pub fn single_hash(md5: Arc<SerialMd5>, events: EventSender) -> StageFn<Item> {
    Box::new(move |input, output| {
        events.send(Event::Stage(StageEvent::Started {
            stage: StageKind::SingleHash,
        }));
        let completed = AtomicUsize::new(0);

        thread::scope(|workers| {
            for item in input.iter() {
                let digits = item.into_number().to_string();
                let out = output.clone();
                let md5 = &md5;
                let events = &events;
                let completed = &completed;

                workers.spawn(move || {
                    let mut crc1 = String::new();
                    let mut crc2 = String::new();

                    // Per-item join: both sub-hashes before emitting
                    thread::scope(|subs| {
                        subs.spawn(|| crc1 = checksum32(&digits));
                        subs.spawn(|| {
                            let digest = md5.digest(&digits);
                            crc2 = checksum32(&digest);
                        });
                    });

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    events.send(Event::Stage(StageEvent::ItemCompleted {
                        stage: StageKind::SingleHash,
                        completed: done,
                    }));
                    let _ = out.send(Item::Signature(format!("{crc1}~{crc2}")));
                });
            }
        });

        events.send(Event::Stage(StageEvent::Completed {
            stage: StageKind::SingleHash,
            emitted: completed.into_inner(),
        }));
    })
}
