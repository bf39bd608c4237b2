use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// Authentication-related errors
///
/// Token failures share the 401 class. `TokenInvalid` covers
/// bad signatures, undecodable payloads and token-type mismatches alike.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email already exists
    #[error("Email already registered: {email}")]
    EmailAlreadyExists { email: String },

    /// Username already exists
    #[error("Username already taken: {username}")]
    UsernameAlreadyExists { username: String },

    /// Unknown user or wrong password
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Current password did not verify during a password change
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Request body failed schema validation
    #[error("{0}")]
    Validation(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Signing failed at issuance (misconfigured key or algorithm)
    #[error("Could not create token")]
    TokenCreationFailed,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Could not validate credentials")]
    TokenInvalid,

    /// Token decoded but carries no usable subject
    #[error("Could not process token")]
    TokenPayloadMalformed,

    /// Token not provided
    #[error("Not authenticated")]
    MissingToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Inactive user")]
    UserInactive,
}

impl AuthError {
    /// HTTP status class for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailAlreadyExists { .. }
            | AuthError::UsernameAlreadyExists { .. }
            | AuthError::IncorrectPassword
            | AuthError::UserInactive => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::TokenInvalid
            | AuthError::TokenPayloadMalformed
            | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::PasswordHashingFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_)
            | AuthError::TokenCreationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AuthError into an HTTP response
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();

        // Storage details stay in the logs
        let message = match &err {
            AuthError::DatabaseError(_) | AuthError::PasswordHashingFailed(_) => {
                tracing::error!(error = %err, "auth request failed");
                "Internal server error".to_string()
            }
            _ => err.to_string(),
        };

        (status, Json(json!({ "error": message })))
    }
}
