use axum::{
    extract::Path,
    http::header,
    response::{Html, IntoResponse},
};

// Pages are static; data is fetched client side through the JSON API
const INDEX: &str = include_str!("../../../../templates/index.html");
const LOGIN: &str = include_str!("../../../../templates/login.html");
const REGISTER: &str = include_str!("../../../../templates/register.html");
const DASHBOARD: &str = include_str!("../../../../templates/dashboard.html");
const VIEW_CALCULATION: &str = include_str!("../../../../templates/view_calculation.html");
const EDIT_CALCULATION: &str = include_str!("../../../../templates/edit_calculation.html");
const APP_JS: &str = include_str!("../../../../templates/app.js");
const BASE_CSS: &str = include_str!("../../../../templates/base.css");

pub async fn index() -> Html<&'static str> {
    Html(INDEX)
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN)
}

pub async fn register_page() -> Html<&'static str> {
    Html(REGISTER)
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD)
}

/// The id is resolved by the page script; unknown ids still render the page
pub async fn view_calculation_page(Path(_id): Path<String>) -> Html<&'static str> {
    Html(VIEW_CALCULATION)
}

pub async fn edit_calculation_page(Path(_id): Path<String>) -> Html<&'static str> {
    Html(EDIT_CALCULATION)
}

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript; charset=utf-8")], APP_JS)
}

pub async fn base_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], BASE_CSS)
}
