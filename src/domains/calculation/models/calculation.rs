use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use crate::shared::errors::CalculationError;

/// Supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl CalculationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Addition => "addition",
            CalculationType::Subtraction => "subtraction",
            CalculationType::Multiplication => "multiplication",
            CalculationType::Division => "division",
        }
    }

    /// Parse the stored column value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "addition" => Some(CalculationType::Addition),
            "subtraction" => Some(CalculationType::Subtraction),
            "multiplication" => Some(CalculationType::Multiplication),
            "division" => Some(CalculationType::Division),
            _ => None,
        }
    }

    /// Fold the inputs left to right.
    ///
    /// Requires at least two inputs; division rejects any zero divisor.
    pub fn compute(&self, inputs: &[f64]) -> Result<f64, CalculationError> {
        let (first, rest) = match inputs.split_first() {
            Some((first, rest)) if !rest.is_empty() => (*first, rest),
            _ => {
                return Err(CalculationError::Validation(
                    "Inputs must contain at least two numbers".to_string(),
                ))
            }
        };

        let result: f64 = match self {
            CalculationType::Addition => inputs.iter().sum(),
            CalculationType::Subtraction => rest.iter().fold(first, |acc, x| acc - x),
            CalculationType::Multiplication => inputs.iter().product(),
            CalculationType::Division => {
                if rest.iter().any(|x| *x == 0.0) {
                    return Err(CalculationError::Validation("Cannot divide by zero".to_string()));
                }
                rest.iter().fold(first, |acc, x| acc / x)
            }
        };

        Ok(result)
    }
}

/// Calculation record (DB row)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Calculation {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a calculation
#[derive(Debug, Clone)]
pub struct NewCalculation {
    pub user_id: Uuid,
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
}

// Create request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationCreate {
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
}

// Update request: new inputs, same operation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationUpdate {
    pub inputs: Vec<f64>,
}
