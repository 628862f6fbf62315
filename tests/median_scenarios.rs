use bevstat::stats::median::median_bucket;
use bevstat::{AgeGroup, BevError};

fn buckets(pairs: &[(&str, u64)]) -> Vec<(AgeGroup, u64)> {
    pairs
        .iter()
        .map(|(label, n)| (AgeGroup::parse(label), *n))
        .collect()
}

#[test]
fn tie_at_half_falls_to_next_bucket() {
    // cumulative = [10, 20, 20, 40], half = 20; the first strictly greater
    // entry is the last bucket, not the exact-half tie at index 1/2
    let input = buckets(&[("00 - 03", 10), ("03 - 06", 10), ("06 - 10", 0), ("10 - 15", 20)]);
    let median = median_bucket(&input).unwrap();
    assert_eq!(median.label(), "10 - 15");
}

#[test]
fn single_bucket_holds_the_median() {
    let input = buckets(&[("00 - 03", 5)]);
    assert_eq!(median_bucket(&input).unwrap().label(), "00 - 03");
}

#[test]
fn all_zero_distribution_has_no_median() {
    let input = buckets(&[("00 - 03", 0), ("03 - 06", 0)]);
    assert!(matches!(median_bucket(&input), Err(BevError::EmptyDistribution)));
}

#[test]
fn even_split_over_two_buckets_returns_the_second() {
    let input = buckets(&[("00 - 03", 30), ("03 - 06", 30)]);
    assert_eq!(median_bucket(&input).unwrap().label(), "03 - 06");
}

#[test]
fn zero_count_bucket_mid_sequence_is_never_selected() {
    let input = buckets(&[("00 - 03", 3), ("03 - 06", 0), ("06 - 10", 4)]);
    assert_eq!(median_bucket(&input).unwrap().label(), "06 - 10");
}

#[test]
fn odd_total_does_not_floor_the_half_value() {
    // total = 3, half = 1.5; cumulative [1, 3] crosses at the second bucket.
    // An integer half of 1 would already cross at the first.
    let input = buckets(&[("00 - 03", 1), ("03 - 06", 2)]);
    assert_eq!(median_bucket(&input).unwrap().label(), "03 - 06");
}

#[test]
fn input_order_does_not_matter() {
    // buckets arrive unsorted and with an irregular raw label; the resolver
    // sorts by normalized age order before accumulating
    let shuffled = buckets(&[("10 - 15", 20), ("unter 3", 10), ("06 - 10", 0), ("3 - 6", 10)]);
    assert_eq!(median_bucket(&shuffled).unwrap().label(), "10 - 15");
}

#[test]
fn resolver_is_deterministic() {
    let input = buckets(&[("00 - 03", 7), ("03 - 06", 7), ("06 - 10", 7)]);
    let first = median_bucket(&input).unwrap();
    for _ in 0..10 {
        assert_eq!(median_bucket(&input).unwrap(), first);
    }
}
