//! Integration tests for the signing pipeline.
//!
//! These tests verify end-to-end behavior including:
//! - Round-trip of the input multiset through all three stages
//! - Determinism under perturbed worker schedules
//! - Empty batches and batches larger than the channel capacity

use batch_signer::core::pipeline::SignerPipeline;
use batch_signer::core::primitives::{checksum32, SerialMd5};
use batch_signer::core::stages::SALT_COUNT;
use std::time::Duration;

/// Sequential reference implementation of the per-value signature
fn reference_signature(value: i64, md5: &SerialMd5) -> String {
    let digits = value.to_string();
    let single = format!(
        "{}~{}",
        checksum32(&digits),
        checksum32(&md5.digest(&digits))
    );
    (0..SALT_COUNT)
        .map(|salt| checksum32(&format!("{salt}{single}")))
        .collect()
}

#[test]
fn combined_output_is_the_sorted_multiset_of_item_signatures() {
    // Duplicate values stay duplicated - the pipeline is a pure function
    // of the input multiset
    let values = vec![5, -1, 5, 0, 99];

    let pipeline = SignerPipeline::builder().build().unwrap();
    let report = pipeline.run(&values).unwrap();

    let parts: Vec<String> = report.combined.split('_').map(String::from).collect();
    assert_eq!(parts.len(), values.len());

    let md5 = SerialMd5::new();
    let mut expected: Vec<String> = values
        .iter()
        .map(|&value| reference_signature(value, &md5))
        .collect();
    expected.sort();

    assert_eq!(parts, expected);
}

#[test]
fn identical_batches_produce_byte_identical_output() {
    let fast = SignerPipeline::builder().build().unwrap();
    let slow = SignerPipeline::builder()
        .md5_latency(Duration::from_millis(3))
        .build()
        .unwrap();

    let first = fast.run(&[1, 2]).unwrap().combined;
    let second = fast.run(&[1, 2]).unwrap().combined;
    // The latency perturbs which worker finishes first; the sort in
    // CombineResults must erase that difference
    let perturbed = slow.run(&[1, 2]).unwrap().combined;

    assert_eq!(first, second);
    assert_eq!(first, perturbed);
}

#[test]
fn single_value_batch_round_trip() {
    let pipeline = SignerPipeline::builder().build().unwrap();
    let report = pipeline.run(&[0]).unwrap();

    assert_eq!(report.combined, reference_signature(0, &SerialMd5::new()));
    assert!(!report.combined.contains('_'));
}

#[test]
fn empty_batch_produces_empty_signature() {
    let pipeline = SignerPipeline::builder().build().unwrap();
    let report = pipeline.run(&[]).unwrap();

    assert_eq!(report.combined, "");
    assert_eq!(report.items, 0);
}

#[test]
fn batch_larger_than_channel_capacity_loses_nothing() {
    // 150 values through capacity-100 channels: the producers feel
    // backpressure but every value arrives
    let values: Vec<i64> = (0..150).collect();

    let pipeline = SignerPipeline::builder().build().unwrap();
    let report = pipeline.run(&values).unwrap();

    assert_eq!(report.combined.split('_').count(), 150);
    assert_eq!(report.md5_overheats, 0);
}

#[test]
fn tiny_channel_capacity_still_completes() {
    let values: Vec<i64> = (0..20).collect();

    let pipeline = SignerPipeline::builder().capacity(1).build().unwrap();
    let report = pipeline.run(&values).unwrap();

    assert_eq!(report.combined.split('_').count(), 20);
}

#[test]
fn item_signatures_have_the_expected_shape() {
    let pipeline = SignerPipeline::builder().build().unwrap();
    let report = pipeline.run(&[7, 8, 9]).unwrap();

    for part in report.combined.split('_') {
        // Six fixed-width hex checksums back to back
        assert_eq!(part.len(), SALT_COUNT * 8);
        assert!(part.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn one_pipeline_can_sign_multiple_batches() {
    let pipeline = SignerPipeline::builder().build().unwrap();

    let first = pipeline.run(&[1]).unwrap();
    let second = pipeline.run(&[2]).unwrap();

    assert_ne!(first.combined, second.combined);
    // Overheat accounting is per run, not cumulative
    assert_eq!(second.md5_overheats, 0);
}
