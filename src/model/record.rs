use serde::{Deserialize, Serialize};

use crate::model::age_group::AgeGroup;

/// The nine demographic count columns of a register row, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountField {
    PopulationTotal,
    PopulationMale,
    PopulationFemale,
    GermanTotal,
    GermanMale,
    GermanFemale,
    ForeignerTotal,
    ForeignerMale,
    ForeignerFemale,
}

impl CountField {
    pub const ALL: [CountField; 9] = [
        CountField::PopulationTotal,
        CountField::PopulationMale,
        CountField::PopulationFemale,
        CountField::GermanTotal,
        CountField::GermanMale,
        CountField::GermanFemale,
        CountField::ForeignerTotal,
        CountField::ForeignerMale,
        CountField::ForeignerFemale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CountField::PopulationTotal => "population_total",
            CountField::PopulationMale => "population_male",
            CountField::PopulationFemale => "population_female",
            CountField::GermanTotal => "german_total",
            CountField::GermanMale => "german_male",
            CountField::GermanFemale => "german_female",
            CountField::ForeignerTotal => "foreigner_total",
            CountField::ForeignerMale => "foreigner_male",
            CountField::ForeignerFemale => "foreigner_female",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One register row: territory x age group x extract date, with the nine
/// demographic counts indexed by [`CountField`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub territory_key: String,
    pub territorial_unit: String,
    pub date: String,
    pub age_group: AgeGroup,
    pub counts: [u64; 9],
}

impl RawRecord {
    pub fn count(&self, field: CountField) -> u64 {
        self.counts[field.index()]
    }

    /// Component-sum consistency: male + female must give the total, and
    /// german + foreigner must give the population, per nationality block.
    /// Suppressed "x" cells are loaded as 0 and routinely break this for
    /// small territories, so a violation is reportable but never fatal.
    pub fn consistency_violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        let pairs = [
            (CountField::PopulationTotal, CountField::PopulationMale, CountField::PopulationFemale),
            (CountField::GermanTotal, CountField::GermanMale, CountField::GermanFemale),
            (CountField::ForeignerTotal, CountField::ForeignerMale, CountField::ForeignerFemale),
        ];
        for (total, male, female) in pairs {
            if self.count(total) != self.count(male) + self.count(female) {
                out.push(format!(
                    "{} != {} + {}",
                    total.name(),
                    male.name(),
                    female.name()
                ));
            }
        }
        if self.count(CountField::PopulationTotal)
            != self.count(CountField::GermanTotal) + self.count(CountField::ForeignerTotal)
        {
            out.push("german_total + foreigner_total != population_total".to_string());
        }
        out
    }
}

/// A [`RawRecord`] with its nine percentage-of-scope-total columns, as shown
/// in the age-pyramid view. `percentages[i]` corresponds to
/// `CountField::ALL[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub percentages: [f64; 9],
}

impl SelectedRecord {
    pub fn percentage(&self, field: CountField) -> f64 {
        self.percentages[field.index()]
    }
}
