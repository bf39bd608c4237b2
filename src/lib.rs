//! Calculator server: user accounts with JWT authentication and a per-user
//! calculation history, served as a JSON API plus static HTML pages.

pub mod domains;
pub mod routes;
pub mod shared;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::{create_router, docs::ApiDoc};
use crate::shared::services::AppState;

/// Build the full application: API, pages, Swagger UI, CORS and request tracing
pub fn create_app(app_state: AppState) -> Result<Router> {
    let cors = cors_layer(app_state.config.cors_origin.as_deref())?;

    Ok(Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

/// Credentials are only allowed for an explicit origin
fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];

    let layer = match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS_ORIGIN: {}", origin))?,
            )
            .allow_credentials(true),
        None => CorsLayer::new().allow_origin(Any),
    };

    Ok(layer.allow_methods(methods).allow_headers(headers))
}
