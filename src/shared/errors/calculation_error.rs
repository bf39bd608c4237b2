use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// Calculation-related errors
#[derive(Error, Debug)]
pub enum CalculationError {
    /// Missing, or owned by another user
    #[error("Calculation not found: id={id}")]
    NotFound { id: Uuid },

    /// Inputs rejected (too few numbers, division by zero)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<CalculationError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CalculationError) -> Self {
        let (status, message) = match &err {
            CalculationError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "Calculation not found".to_string())
            }
            CalculationError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            CalculationError::DatabaseError(_) => {
                tracing::error!(error = %err, "calculation request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message })))
    }
}
