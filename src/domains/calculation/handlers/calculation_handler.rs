use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use crate::domains::calculation::models::{Calculation, CalculationCreate, CalculationUpdate};
use crate::shared::errors::ApiError;
use crate::shared::middleware::{ApiJson, ApiPath, AuthenticatedUser};
use crate::shared::services::AppState;

#[utoipa::path(
    post,
    path = "/calculations",
    request_body = CalculationCreate,
    responses(
        (status = 201, description = "Calculation created", body = Calculation),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid inputs")
    ),
    security(("BearerAuth" = [])),
    tag = "Calculations"
)]
pub async fn create_calculation(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ApiJson(request): ApiJson<CalculationCreate>,
) -> Result<(StatusCode, Json<Calculation>), ApiError> {
    let calculation = app_state
        .calculation_state
        .calculation_service
        .create(authenticated_user.user.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(calculation)))
}

#[utoipa::path(
    get,
    path = "/calculations",
    responses(
        (status = 200, description = "Calculations of the current user, newest first", body = [Calculation]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Calculations"
)]
pub async fn list_calculations(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<Calculation>>, ApiError> {
    let calculations = app_state
        .calculation_state
        .calculation_service
        .list(authenticated_user.user.id)
        .await?;

    Ok(Json(calculations))
}

#[utoipa::path(
    get,
    path = "/calculations/{id}",
    params(("id" = Uuid, Path, description = "Calculation ID")),
    responses(
        (status = 200, description = "Calculation", body = Calculation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Calculation not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Calculations"
)]
pub async fn get_calculation(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Calculation>, ApiError> {
    let calculation = app_state
        .calculation_state
        .calculation_service
        .get(id, authenticated_user.user.id)
        .await?;

    Ok(Json(calculation))
}

#[utoipa::path(
    put,
    path = "/calculations/{id}",
    params(("id" = Uuid, Path, description = "Calculation ID")),
    request_body = CalculationUpdate,
    responses(
        (status = 200, description = "Calculation updated", body = Calculation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Calculation not found"),
        (status = 422, description = "Invalid inputs")
    ),
    security(("BearerAuth" = [])),
    tag = "Calculations"
)]
pub async fn update_calculation(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CalculationUpdate>,
) -> Result<Json<Calculation>, ApiError> {
    let calculation = app_state
        .calculation_state
        .calculation_service
        .update(id, authenticated_user.user.id, request)
        .await?;

    Ok(Json(calculation))
}

#[utoipa::path(
    delete,
    path = "/calculations/{id}",
    params(("id" = Uuid, Path, description = "Calculation ID")),
    responses(
        (status = 204, description = "Calculation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Calculation not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Calculations"
)]
pub async fn delete_calculation(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .calculation_state
        .calculation_service
        .delete(id, authenticated_user.user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
