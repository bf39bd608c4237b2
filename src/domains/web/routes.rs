// Browser front end routes
use axum::{routing::get, Router};
use crate::domains::web::handlers::page_handler;
use crate::shared::services::AppState;

/// HTML pages and their static assets
pub fn create_web_router() -> Router<AppState> {
    Router::new()
        .route("/", get(page_handler::index))
        .route("/login", get(page_handler::login_page))
        .route("/register", get(page_handler::register_page))
        .route("/dashboard", get(page_handler::dashboard_page))
        .route("/dashboard/view/:id", get(page_handler::view_calculation_page))
        .route("/dashboard/edit/:id", get(page_handler::edit_calculation_page))
        .route("/static/app.js", get(page_handler::app_js))
        .route("/static/base.css", get(page_handler::base_css))
}
