//! # Events Module
//!
//! Event-driven progress reporting for pipeline runs.
//!
//! ## Design
//! The core library emits events through channels, allowing any front-end
//! (CLI, GUI, tests) to subscribe and display progress without the stages
//! knowing who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Stage(StageEvent::ItemCompleted { stage, completed }) => {
//!                 println!("{stage}: {completed} done")
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the pipeline with the sender
//! pipeline.run_with_events(&values, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
