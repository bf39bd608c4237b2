// Calculation domain state
use std::sync::Arc;
use crate::domains::calculation::services::CalculationService;
use crate::shared::database::CalculationStore;

#[derive(Clone)]
pub struct CalculationState {
    pub calculation_service: CalculationService,
}

impl CalculationState {
    pub fn new(calculations: Arc<dyn CalculationStore>) -> Self {
        Self {
            calculation_service: CalculationService::new(calculations),
        }
    }
}
