pub mod age_group;
pub mod record;
