// Calculation domain services
pub mod calculation_service;
pub mod state;

pub use calculation_service::*;
pub use state::*;
