use crate::model::record::{CountField, RawRecord, SelectedRecord};

/// Add the nine percentage-of-total columns to a record set.
///
/// Each column's denominator is that column's sum over exactly the records
/// given here; callers pick the scope (one territory's age rows for the
/// pyramid, one unit's summed row for the map) and must not mix them. A
/// column summing to 0 yields 0.0 for every row: an empty subgroup is a
/// valid slice, not a division error.
pub fn add_shares(records: &[RawRecord]) -> Vec<SelectedRecord> {
    let mut sums = [0u64; 9];
    for record in records {
        for field in CountField::ALL {
            sums[field.index()] += record.count(field);
        }
    }

    records
        .iter()
        .map(|record| {
            let mut percentages = [0.0f64; 9];
            for field in CountField::ALL {
                let sum = sums[field.index()];
                if sum > 0 {
                    percentages[field.index()] =
                        100.0 / sum as f64 * record.count(field) as f64;
                }
            }
            SelectedRecord {
                record: record.clone(),
                percentages,
            }
        })
        .collect()
}
