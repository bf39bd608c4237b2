use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::domains::auth::models::{TokenClaims, TokenType, User};
use crate::shared::errors::{ApiError, AuthError};
use crate::shared::services::AppState;

/// Authenticated, active user resolved from a Bearer access token
///
/// ```rust,ignore
/// pub async fn get_me(user: AuthenticatedUser) -> Json<UserResponse> {
///     Json(user.user.into())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: TokenClaims,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.to_string();

        let tokens = &state.auth_state.token_authority;
        let claims = tokens.decode_token(&token, TokenType::Access).await?;
        let user = tokens
            .resolve_user(&claims, state.auth_state.users.as_ref())
            .await?;

        Ok(AuthenticatedUser { user, claims, token })
    }
}

/// Token from `Authorization: Bearer <token>`; any other shape is unauthenticated
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}
