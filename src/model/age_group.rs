use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label the register uses for the all-ages aggregate row. Rows carrying it
/// must be excluded before any per-age computation, otherwise totals
/// double-count.
pub const AGGREGATE_LABEL: &str = "Insgesamt";

/// An ordered age bucket, e.g. "10 - 15" for ages 10 to under 15.
///
/// The raw source labels the youngest buckets irregularly ("unter 3",
/// "3 - 6", "6 - 10"); construction normalizes them to a zero-padded
/// "LO - HI" form so that lookup and ordering behave. Ordering is numeric by
/// the lower bound of the range, never lexicographic. The aggregate label is
/// kept as its own variant and sorts after every real bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeGroup {
    label: String,
}

impl AgeGroup {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let label = match trimmed {
            "unter 3" => "00 - 03".to_string(),
            "3 - 6" => "03 - 06".to_string(),
            "6 - 10" => "06 - 10".to_string(),
            other => other.to_string(),
        };
        Self { label }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_aggregate(&self) -> bool {
        self.label == AGGREGATE_LABEL
    }

    /// Lower bound of the age range, used as the sort key. "75 und mehr"
    /// style open-ended buckets parse their leading number; the aggregate
    /// label has no bound.
    pub fn lower_bound(&self) -> Option<u32> {
        let digits: String = self
            .label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl Ord for AgeGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.lower_bound(), other.lower_bound()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.label.cmp(&other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

impl PartialOrd for AgeGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
