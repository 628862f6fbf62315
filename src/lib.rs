pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod stats;

pub use error::BevError;
pub use model::age_group::AgeGroup;
pub use model::record::{CountField, RawRecord, SelectedRecord};
pub use pipeline::{map_view, territory_view, TerritoryView};
pub use stats::aggregate::{Granularity, TerritoryAggregate};
