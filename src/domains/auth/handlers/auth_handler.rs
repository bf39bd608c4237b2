use crate::domains::auth::models::{
    LogoutRequest, MessageResponse, PasswordUpdate, RefreshTokenRequest, TokenResponse, UserCreate,
    UserLogin, UserResponse,
};
use crate::shared::errors::ApiError;
use crate::shared::middleware::{ApiJson, AuthenticatedUser, OptionalJson};
use crate::shared::services::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Email or username already registered"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = app_state.auth_state.auth_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = UserLogin,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Inactive user"),
        (status = 401, description = "Incorrect username or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (user, pair) = app_state.auth_state.auth_service.login(request).await?;

    Ok(Json(pair.into_response(user)))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = TokenResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (user, pair) = app_state
        .auth_state
        .auth_service
        .refresh(&request.refresh_token)
        .await?;

    Ok(Json(pair.into_response(user)))
}

/// Body is optional; a refresh token in it is revoked as well
#[utoipa::path(
    post,
    path = "/auth/logout",
    request_body(content = LogoutRequest, description = "Optional refresh token to revoke"),
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    OptionalJson(request): OptionalJson<LogoutRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = request.unwrap_or_default();

    app_state
        .auth_state
        .auth_service
        .logout(&authenticated_user.claims, request.refresh_token.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "User info retrieved successfully", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Auth"
)]
pub async fn get_me(authenticated_user: AuthenticatedUser) -> Json<UserResponse> {
    Json(authenticated_user.user.into())
}

#[utoipa::path(
    post,
    path = "/auth/change-password",
    request_body = PasswordUpdate,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    security(("BearerAuth" = [])),
    tag = "Auth"
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ApiJson(request): ApiJson<PasswordUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .change_password(&authenticated_user.user, request)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
