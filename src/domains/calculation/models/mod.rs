// Calculation domain models
pub mod calculation;

pub use calculation::*;
