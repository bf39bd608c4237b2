// Calculation repositories
pub mod calculation_repository;

pub use calculation_repository::*;
