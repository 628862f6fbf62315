use serde::{Deserialize, Serialize};

use crate::error::BevError;
use crate::model::age_group::AgeGroup;
use crate::model::record::{CountField, RawRecord, SelectedRecord};
use crate::stats::aggregate::{self, Granularity, TerritoryAggregate};
use crate::stats::median::median_bucket;
use crate::stats::share::add_shares;

/// Select the rows of one territorial unit, dropping the all-ages aggregate
/// rows. Matching is exact string equality: "Mitte" must never pull in
/// "Mitte (Ortsteil)".
pub fn filter_territory(
    records: &[RawRecord],
    territorial_unit: &str,
) -> Result<Vec<RawRecord>, BevError> {
    let selected: Vec<RawRecord> = records
        .iter()
        .filter(|r| r.territorial_unit == territorial_unit)
        .filter(|r| !r.age_group.is_aggregate())
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(BevError::UnknownTerritory(territorial_unit.to_string()));
    }
    Ok(selected)
}

/// Column sums over the selected rows, backing the dashboard's stat cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub totals: [u64; 9],
}

impl SummaryCounts {
    fn from_records(records: &[RawRecord]) -> Self {
        let mut totals = [0u64; 9];
        for record in records {
            for field in CountField::ALL {
                totals[field.index()] += record.count(field);
            }
        }
        Self { totals }
    }

    pub fn total(&self, field: CountField) -> u64 {
        self.totals[field.index()]
    }

    /// Share of a subgroup within its gender scope: male subgroups are
    /// related to the male population, female to the female, totals to the
    /// whole. 0.0 when the scope is empty.
    pub fn share_of_population(&self, field: CountField) -> f64 {
        let scope = match field {
            CountField::PopulationMale | CountField::GermanMale | CountField::ForeignerMale => {
                CountField::PopulationMale
            }
            CountField::PopulationFemale
            | CountField::GermanFemale
            | CountField::ForeignerFemale => CountField::PopulationFemale,
            _ => CountField::PopulationTotal,
        };
        let denominator = self.total(scope);
        if denominator == 0 {
            return 0.0;
        }
        100.0 / denominator as f64 * self.total(field) as f64
    }
}

/// Everything the age-pyramid view needs for one territory: the rows with
/// their percentage columns, one median age-group marker per count column
/// (None when that subgroup is empty), and the summary counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryView {
    pub territorial_unit: String,
    pub rows: Vec<SelectedRecord>,
    pub medians: [Option<AgeGroup>; 9],
    pub summary: SummaryCounts,
}

impl TerritoryView {
    pub fn median(&self, field: CountField) -> Option<&AgeGroup> {
        self.medians[field.index()].as_ref()
    }
}

/// Statistics for one territory: filter, shares, nine medians, summary.
/// Pure over the loaded record set; recomputed per selection change.
pub fn territory_view(
    records: &[RawRecord],
    territorial_unit: &str,
) -> Result<TerritoryView, BevError> {
    let selected = filter_territory(records, territorial_unit)?;

    let mut medians: [Option<AgeGroup>; 9] = Default::default();
    for field in CountField::ALL {
        let buckets: Vec<(AgeGroup, u64)> = selected
            .iter()
            .map(|r| (r.age_group.clone(), r.count(field)))
            .collect();
        medians[field.index()] = match median_bucket(&buckets) {
            Ok(group) => Some(group),
            // an empty subgroup renders without a marker
            Err(BevError::EmptyDistribution) => None,
            Err(e) => return Err(e),
        };
    }

    let summary = SummaryCounts::from_records(&selected);
    let mut rows = add_shares(&selected);
    rows.sort_by(|a, b| a.record.age_group.cmp(&b.record.age_group));

    Ok(TerritoryView {
        territorial_unit: territorial_unit.to_string(),
        rows,
        medians,
        summary,
    })
}

/// Statistics for every unit of one granularity, for the choropleth layer.
pub fn map_view(
    records: &[RawRecord],
    granularity: Granularity,
) -> Result<Vec<TerritoryAggregate>, BevError> {
    aggregate::aggregate(records, granularity)
}

/// Sorted unique unit names, optionally restricted to one granularity.
/// Drives the territory dropdown.
pub fn list_territories(records: &[RawRecord], granularity: Option<Granularity>) -> Vec<String> {
    let mut units: Vec<String> = records
        .iter()
        .map(|r| r.territorial_unit.clone())
        .filter(|unit| match granularity {
            Some(g) => unit.contains(g.marker()),
            None => true,
        })
        .collect();
    units.sort();
    units.dedup();
    units
}
