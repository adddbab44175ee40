//! # Primitives Module
//!
//! The two hashing primitives the pipeline is built on.
//!
//! - [`checksum32`] - a fast 32-bit checksum. Pure and thread-safe; call
//!   it from as many workers as you like.
//! - [`Md5Primitive`] - an MD5 digest that models a rate-limited external
//!   resource: only one call may be in flight at a time. Concurrent
//!   unserialized calls are detected and counted as "overheats".
//! - [`SerialMd5`] - the mutex-guarded handle that enforces the digest's
//!   serialized-access contract. Stages share one handle and never touch
//!   the raw primitive.

use md5::{Digest, Md5};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use xxhash_rust::xxh32::xxh32;

/// Compute the 32-bit checksum of a string, rendered as 8 lowercase hex
/// characters.
///
/// The fixed-width rendering is load-bearing: MultiHash concatenates six
/// of these back to back, and the positional decomposition only works if
/// every checksum has the same length.
pub fn checksum32(data: &str) -> String {
    format!("{:08x}", xxh32(data.as_bytes(), 0))
}

/// An MD5 digest modeled as a rate-limited external resource.
///
/// The primitive itself is deterministic, but it tolerates only one call
/// in flight at a time. A second call arriving while one is running is a
/// contract violation; the primitive detects it, records an overheat, and
/// waits its turn. Callers are expected to serialize access externally -
/// see [`SerialMd5`].
pub struct Md5Primitive {
    busy: AtomicBool,
    latency: Duration,
    overheats: AtomicUsize,
}

impl Md5Primitive {
    /// Create a primitive with no simulated latency.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Create a primitive that holds the resource for `latency` per call.
    ///
    /// Useful for demonstrating the cost of serialization and for
    /// perturbing worker schedules in tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            busy: AtomicBool::new(false),
            latency,
            overheats: AtomicUsize::new(0),
        }
    }

    /// Compute the digest of `data`, rendered as 32 lowercase hex
    /// characters.
    ///
    /// Calling this from two threads at once is misuse; the overlap is
    /// recorded and the late caller spins until the resource frees up.
    pub fn compute(&self, data: &str) -> String {
        if self.busy.swap(true, Ordering::AcqRel) {
            // Someone else is already in flight
            self.overheats.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("unserialized digest call detected; waiting for the resource");
            while self.busy.swap(true, Ordering::AcqRel) {
                thread::yield_now();
            }
        }

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let rendered = hex_string(&Md5::digest(data.as_bytes()));

        self.busy.store(false, Ordering::Release);
        rendered
    }

    /// Number of concurrent-call violations observed so far.
    pub fn overheats(&self) -> usize {
        self.overheats.load(Ordering::Relaxed)
    }
}

impl Default for Md5Primitive {
    fn default() -> Self {
        Self::new()
    }
}

/// The serialized handle to the digest primitive.
///
/// The mutex lives here, not in the stages: whoever holds a `SerialMd5`
/// gets the serialization contract for free, and the lock is held only
/// for the duration of the raw digest call. Work that merely depends on
/// the digest's output (like the follow-up checksum in SingleHash) runs
/// after the lock is released.
pub struct SerialMd5 {
    primitive: Md5Primitive,
    gate: Mutex<()>,
}

impl SerialMd5 {
    /// Create a handle around a zero-latency primitive.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Create a handle around a primitive with simulated latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            primitive: Md5Primitive::with_latency(latency),
            gate: Mutex::new(()),
        }
    }

    /// Compute the digest of `data` with the serialization contract
    /// enforced.
    pub fn digest(&self, data: &str) -> String {
        let _held = self.gate.lock().unwrap();
        self.primitive.compute(data)
    }

    /// Number of overheats the underlying primitive observed.
    ///
    /// Always 0 when every caller goes through this handle.
    pub fn overheats(&self) -> usize {
        self.primitive.overheats()
    }
}

impl Default for SerialMd5 {
    fn default() -> Self {
        Self::new()
    }
}

/// Render bytes as lowercase hex
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
