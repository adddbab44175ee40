//! CombineResults stage implementation.
//!
//! The synchronization point of the whole pipeline: everything upstream
//! emits in worker-completion order, and the sort here is what makes the
//! final output deterministic for a given input batch.

use super::Item;
use crate::core::pipeline::StageFn;
use crate::events::{Event, EventSender, StageEvent, StageKind};

/// Build the CombineResults stage.
///
/// Single-threaded by design: drains every signature from its input,
/// sorts ascending, joins with `_`, and emits exactly one combined
/// string - an empty one for an empty batch.
pub fn combine_results(events: EventSender) -> StageFn<Item> {
    Box::new(move |input, output| {
        events.send(Event::Stage(StageEvent::Started {
            stage: StageKind::Combine,
        }));

        let mut results: Vec<String> = input.iter().map(Item::into_signature).collect();
        results.sort();
        let _ = output.send(Item::Signature(results.join("_")));

        events.send(Event::Stage(StageEvent::Completed {
            stage: StageKind::Combine,
            emitted: 1,
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

    fn run_combine(signatures: Vec<&str>) -> String {
        let sink = execute(vec![
            signature_source(signatures),
            combine_results(null_sender()),
        ]);
        let combined = sink.recv().unwrap().into_signature();
        // Exactly one emission
        assert!(sink.recv().is_err());
        combined
    }

    #[test]
    fn results_are_sorted_before_joining() {
        assert_eq!(run_combine(vec!["beta", "alpha", "gamma"]), "alpha_beta_gamma");
    }

    #[test]
    fn single_item_passes_through_unseparated() {
        assert_eq!(run_combine(vec!["only"]), "only");
    }

    #[test]
    fn empty_input_yields_empty_combined_string() {
        assert_eq!(run_combine(vec![]), "");
    }

    #[test]
    fn duplicate_signatures_are_kept() {
        assert_eq!(run_combine(vec!["x", "x"]), "x_x");
    }
}
