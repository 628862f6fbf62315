pub mod register_csv;
pub mod sources;
