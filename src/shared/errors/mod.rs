// Shared errors
pub mod auth_error;
pub mod calculation_error;

pub use auth_error::*;
pub use calculation_error::*;

use axum::{http::StatusCode, Json};

/// Error shape returned by every handler
pub type ApiError = (StatusCode, Json<serde_json::Value>);
