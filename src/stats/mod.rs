pub mod aggregate;
pub mod median;
pub mod share;
