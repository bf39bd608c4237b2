// Calculation handlers
pub mod calculation_handler;
