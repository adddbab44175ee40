//! Generic pipeline executor.
//!
//! Wires an ordered sequence of stage functions into a chain of bounded
//! channels and runs every stage on its own worker thread. Completion
//! propagates through channel closure: each stage's output sender is
//! moved into its worker, so the channel closes the moment the stage
//! function returns - however it returns.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::panic;
use std::thread;

/// Capacity of the channels between stages.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// A single pipeline stage: reads items from its input channel until it
/// is closed and drained, writes items to its output channel.
///
/// A stage owns no state beyond its closure and runs exactly once.
pub type StageFn<T> = Box<dyn FnOnce(Receiver<T>, Sender<T>) + Send>;

/// An already-closed, empty source channel.
///
/// Feeding the pipeline is a configuration choice: use this when the
/// first stage generates its own values (the usual arrangement), or hand
/// [`run_stages`] a receiver you have populated yourself.
pub fn closed_source<T>() -> Receiver<T> {
    let (_sender, receiver) = bounded(DEFAULT_CHANNEL_CAPACITY);
    receiver
}

/// Run `stages` against a synthesized closed source with the default
/// channel capacity, blocking until every worker has finished.
///
/// Returns the final channel's receiver; the aggregated output can be
/// read off it after this call returns, as long as it fits in the
/// bounded buffer.
pub fn execute<T: Send + 'static>(stages: Vec<StageFn<T>>) -> Receiver<T> {
    run_stages(closed_source(), stages, DEFAULT_CHANNEL_CAPACITY)
}

/// Run `stages` reading from `source`, with `capacity`-bounded channels
/// between stages.
///
/// Launches one worker thread per stage, wiring worker *i* to read from
/// channel *i* and write to channel *i+1*, then joins them all. An empty
/// stage sequence is a no-op: the source receiver is returned untouched
/// and nothing is spawned.
///
/// There is no error channel. If a worker panics, the panic is re-raised
/// on the calling thread - after every other worker has been joined, so
/// the join-all contract holds even on the failure path.
pub fn run_stages<T: Send + 'static>(
    source: Receiver<T>,
    stages: Vec<StageFn<T>>,
    capacity: usize,
) -> Receiver<T> {
    let stage_count = stages.len();
    tracing::debug!(stages = stage_count, capacity, "launching pipeline workers");

    let mut input = source;
    let mut workers = Vec::with_capacity(stage_count);

    for stage in stages {
        let (sender, receiver) = bounded(capacity);
        let upstream = std::mem::replace(&mut input, receiver);
        workers.push(thread::spawn(move || stage(upstream, sender)));
    }

    let mut fault = None;
    for worker in workers {
        if let Err(payload) = worker.join() {
            // Keep joining; re-raise the first fault once everyone is done
            fault.get_or_insert(payload);
        }
    }
    if let Some(payload) = fault {
        panic::resume_unwind(payload);
    }

    input
}
