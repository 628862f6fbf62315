use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BevError;
use crate::model::record::{CountField, RawRecord};

/// Territorial subdivision level for the map layer. The register encodes the
/// level as a parenthetical suffix on the unit name ("Vegesack (Stadtteil)"),
/// not as a separate column, so selection is a substring match on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Stadtteil,
    Ortsteil,
    Stadtbezirk,
}

impl Granularity {
    pub fn marker(self) -> &'static str {
        match self {
            Granularity::Stadtteil => "Stadtteil",
            Granularity::Ortsteil => "Ortsteil",
            Granularity::Stadtbezirk => "Stadtbezirk",
        }
    }
}

/// Per-unit aggregate for the choropleth layer: all nine counts summed over
/// age groups and dates, the three map percentages, and the join key the
/// geometry layer matches against its polygon features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryAggregate {
    pub territorial_unit: String,
    pub join_key: String,
    pub counts: [u64; 9],
    pub percentage_foreigner: f64,
    pub percentage_male: f64,
    pub percentage_female: f64,
}

impl TerritoryAggregate {
    pub fn count(&self, field: CountField) -> u64 {
        self.counts[field.index()]
    }
}

/// Group records of one granularity by territorial unit and derive the map
/// percentages. Join keys must stay collision-free within the level; two
/// units collapsing to the same key would silently cross-wire the map join,
/// so that case is an error rather than a log line.
pub fn aggregate(
    records: &[RawRecord],
    granularity: Granularity,
) -> Result<Vec<TerritoryAggregate>, BevError> {
    let marker = granularity.marker();

    let mut sums: BTreeMap<&str, [u64; 9]> = BTreeMap::new();
    for record in records {
        if !record.territorial_unit.contains(marker) {
            continue;
        }
        let entry = sums.entry(record.territorial_unit.as_str()).or_default();
        for field in CountField::ALL {
            entry[field.index()] += record.count(field);
        }
    }

    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut out = Vec::with_capacity(sums.len());
    for (unit, counts) in sums {
        let key = join_key(unit);
        if let Some(first) = seen.insert(key.clone(), unit) {
            return Err(BevError::AmbiguousJoinKey {
                key,
                first: first.to_string(),
                second: unit.to_string(),
            });
        }

        let population = counts[CountField::PopulationTotal.index()];
        let share = |n: u64| {
            if population > 0 {
                100.0 / population as f64 * n as f64
            } else {
                0.0
            }
        };

        out.push(TerritoryAggregate {
            territorial_unit: unit.to_string(),
            join_key: key,
            percentage_foreigner: share(counts[CountField::ForeignerTotal.index()]),
            percentage_male: share(counts[CountField::PopulationMale.index()]),
            percentage_female: share(counts[CountField::PopulationFemale.index()]),
            counts,
        });
    }
    Ok(out)
}

/// Key the geometry layer joins on: the unit name before its first
/// parenthesis, trimmed. A name without a parenthesis keeps its full
/// (trimmed) form.
pub fn join_key(territorial_unit: &str) -> String {
    territorial_unit
        .split('(')
        .next()
        .unwrap_or(territorial_unit)
        .trim()
        .to_string()
}
