use std::sync::Arc;
use uuid::Uuid;
use crate::domains::calculation::models::{
    Calculation, CalculationCreate, CalculationUpdate, NewCalculation,
};
use crate::shared::database::CalculationStore;
use crate::shared::errors::CalculationError;

/// Owner-scoped calculation CRUD.
///
/// Records belonging to other users are reported as not found.
#[derive(Clone)]
pub struct CalculationService {
    calculations: Arc<dyn CalculationStore>,
}

impl CalculationService {
    pub fn new(calculations: Arc<dyn CalculationStore>) -> Self {
        Self { calculations }
    }

    pub async fn create(&self, user_id: Uuid, request: CalculationCreate) -> Result<Calculation, CalculationError> {
        let result = request.calculation_type.compute(&request.inputs)?;

        let calculation = self
            .calculations
            .create_calculation(NewCalculation {
                user_id,
                calculation_type: request.calculation_type,
                inputs: request.inputs,
                result,
            })
            .await
            .map_err(|e| CalculationError::DatabaseError(format!("Failed to create calculation: {:#}", e)))?;

        tracing::debug!(
            calculation_id = %calculation.id,
            user_id = %user_id,
            calculation_type = calculation.calculation_type.as_str(),
            "calculation created"
        );
        Ok(calculation)
    }

    /// Newest first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Calculation>, CalculationError> {
        self.calculations
            .list_calculations(user_id)
            .await
            .map_err(|e| CalculationError::DatabaseError(format!("Failed to list calculations: {:#}", e)))
    }

    pub async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Calculation, CalculationError> {
        self.calculations
            .find_calculation(id, user_id)
            .await
            .map_err(|e| CalculationError::DatabaseError(format!("Failed to fetch calculation: {:#}", e)))?
            .ok_or(CalculationError::NotFound { id })
    }

    /// Replace the inputs and recompute with the stored operation
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: CalculationUpdate,
    ) -> Result<Calculation, CalculationError> {
        let existing = self.get(id, user_id).await?;
        let result = existing.calculation_type.compute(&request.inputs)?;

        self.calculations
            .update_calculation(id, user_id, &request.inputs, result)
            .await
            .map_err(|e| CalculationError::DatabaseError(format!("Failed to update calculation: {:#}", e)))?
            .ok_or(CalculationError::NotFound { id })
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CalculationError> {
        let deleted = self
            .calculations
            .delete_calculation(id, user_id)
            .await
            .map_err(|e| CalculationError::DatabaseError(format!("Failed to delete calculation: {:#}", e)))?;

        if !deleted {
            return Err(CalculationError::NotFound { id });
        }

        tracing::debug!(calculation_id = %id, user_id = %user_id, "calculation deleted");
        Ok(())
    }
}
