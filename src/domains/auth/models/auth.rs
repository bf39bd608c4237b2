use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};
use crate::domains::auth::models::user::UserResponse;
use crate::shared::errors::AuthError;

// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    #[schema(example = "John")]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    #[schema(example = "Doe")]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "john@example.com")]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[schema(example = "johndoe")]
    pub username: String,

    /// Password (will be hashed)
    #[validate(length(min = 8, message = "String should have at least 8 characters"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,

    #[schema(example = "SecurePass123!")]
    pub confirm_password: String,
}

impl UserCreate {
    /// Field rules, then password strength, then confirmation
    pub fn check(&self) -> Result<(), AuthError> {
        self.validate().map_err(validation_error)?;
        check_password_strength(&self.password)?;

        if self.password != self.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        Ok(())
    }
}

// Login request (username or email)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserLogin {
    /// Username or email address
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "johndoe")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

impl UserLogin {
    pub fn check(&self) -> Result<(), AuthError> {
        self.validate().map_err(validation_error)
    }
}

// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PasswordUpdate {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "String should have at least 8 characters"))]
    pub new_password: String,

    pub confirm_new_password: String,
}

impl PasswordUpdate {
    pub fn check(&self) -> Result<(), AuthError> {
        self.validate().map_err(validation_error)?;
        check_password_strength(&self.new_password)?;

        if self.new_password != self.confirm_new_password {
            return Err(AuthError::Validation(
                "New password and confirmation do not match".to_string(),
            ));
        }
        if self.current_password == self.new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        Ok(())
    }
}

// Token pair response (login, refresh)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT Access Token (short lifetime)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// JWT Refresh Token (long lifetime)
    pub refresh_token: String,

    #[schema(example = "bearer")]
    pub token_type: String,

    /// Access token expiry (Unix timestamp)
    pub expires_at: i64,

    pub user: UserResponse,
}

// Refresh request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// Logout request: the refresh token is revoked too when given
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Password must mix upper, lower, digit and special characters
pub fn check_password_strength(password: &str) -> Result<(), AuthError> {
    let rules: [(fn(char) -> bool, &str); 4] = [
        (|c| c.is_uppercase(), "Password must contain at least one uppercase letter"),
        (|c| c.is_lowercase(), "Password must contain at least one lowercase letter"),
        (|c| c.is_ascii_digit(), "Password must contain at least one digit"),
        (|c| !c.is_alphanumeric() && !c.is_whitespace(), "Password must contain at least one special character"),
    ];

    for (rule, message) in rules {
        if !password.chars().any(rule) {
            return Err(AuthError::Validation(message.to_string()));
        }
    }

    Ok(())
}

/// Flatten validator output into one message, ordered by field name
fn validation_error(errors: ValidationErrors) -> AuthError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    AuthError::Validation(messages.join("; "))
}
