use crate::error::BevError;
use crate::model::age_group::AgeGroup;

/// Weighted median over a histogram: the bucket containing the population
/// element at the 50th percentile of the cumulative distribution.
///
/// Buckets are sorted by age-group order first, so callers may pass rows in
/// file order. The half value is computed in f64 on purpose: with an odd
/// total, an integer floor would shift the comparison and can mis-assign the
/// median by one bucket. The answer is the first bucket whose cumulative sum
/// strictly exceeds half; a cumulative sum exactly equal to half falls to
/// the next bucket. The scan is deliberately an explicit loop over the
/// cumulative sums so that the strict inequality stays visible.
pub fn median_bucket(buckets: &[(AgeGroup, u64)]) -> Result<AgeGroup, BevError> {
    let mut sorted: Vec<&(AgeGroup, u64)> = buckets.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let total: u64 = sorted.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Err(BevError::EmptyDistribution);
    }
    let half = total as f64 / 2.0;

    let mut cumulative = 0u64;
    for (group, count) in sorted {
        cumulative += count;
        if cumulative as f64 - half > 0.0 {
            return Ok(group.clone());
        }
    }
    // cumulative reaches total > half before the loop ends
    unreachable!("non-empty distribution must cross its half value")
}
