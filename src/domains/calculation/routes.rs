// Calculation domain routes
use axum::{routing::get, Router};
use crate::domains::calculation::handlers::calculation_handler;
use crate::shared::services::AppState;

/// Create calculation router (nested under `/calculations`)
pub fn create_calculation_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(calculation_handler::list_calculations).post(calculation_handler::create_calculation),
        )
        .route(
            "/:id",
            get(calculation_handler::get_calculation)
                .put(calculation_handler::update_calculation)
                .delete(calculation_handler::delete_calculation),
        )
}
