// Routes module: combines all domain routers

pub mod docs;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use crate::shared::services::AppState;

use crate::domains::auth::routes::create_auth_router;
use crate::domains::calculation::routes::create_calculation_router;
use crate::domains::web::routes::create_web_router;

/// Create main router (combines all domain routers)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", create_auth_router())
        .nest("/calculations", create_calculation_router())
        .merge(create_web_router())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
