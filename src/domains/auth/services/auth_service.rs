use std::sync::Arc;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use chrono::Utc;
use crate::domains::auth::models::{
    NewUser, PasswordUpdate, TokenClaims, TokenResponse, TokenType, User, UserCreate, UserLogin,
};
use crate::domains::auth::services::TokenAuthority;
use crate::shared::database::UserStore;
use crate::shared::errors::AuthError;

/// Access + refresh token pair handed out on login and refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl TokenPair {
    pub fn into_response(self, user: User) -> TokenResponse {
        TokenResponse {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: "bearer".to_string(),
            expires_at: self.expires_at,
            user: user.into(),
        }
    }
}

/// Account business logic: registration, login, token rotation, passwords
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenAuthority>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenAuthority>) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, request: UserCreate) -> Result<User, AuthError> {
        request.check()?;

        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        // 1. Duplicate email / username
        let existing = self
            .users
            .find_user_by_email(&email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {:#}", e)))?;
        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists { email });
        }

        let existing = self
            .users
            .find_user_by_username(&username)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check username existence: {:#}", e)))?;
        if existing.is_some() {
            return Err(AuthError::UsernameAlreadyExists { username });
        }

        // 2. Hash
        let password_hash = hash_password(&request.password)?;

        // 3. Store; a concurrent insert can still trip the unique index
        let user = self
            .users
            .create_user(NewUser {
                username: username.clone(),
                email: email.clone(),
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| {
                let detail = format!("{:#}", e);
                if detail.contains("duplicate key") || detail.contains("unique constraint") {
                    if detail.contains("email") {
                        AuthError::EmailAlreadyExists { email: email.clone() }
                    } else {
                        AuthError::UsernameAlreadyExists { username: username.clone() }
                    }
                } else {
                    AuthError::DatabaseError(format!("Failed to create user: {}", detail))
                }
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Login by username or email. Returns the user and a fresh token pair.
    pub async fn login(&self, request: UserLogin) -> Result<(User, TokenPair), AuthError> {
        request.check()?;

        let identifier = request.username.trim();
        let mut user = self
            .users
            .find_user_by_username(identifier)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?;

        if user.is_none() {
            user = self
                .users
                .find_user_by_email(&identifier.to_lowercase())
                .await
                .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?;
        }

        // Unknown user and wrong password look the same
        let mut user = user.ok_or(AuthError::InvalidCredentials)?;
        verify_password(&request.password, &user.password_hash)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        let now = Utc::now();
        self.users
            .record_login(user.id, now)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to record login: {:#}", e)))?;
        user.last_login = Some(now);

        let pair = self.issue_pair(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((user, pair))
    }

    /// Exchange a refresh token for a new pair, revoking the presented one
    pub async fn refresh(&self, refresh_token: &str) -> Result<(User, TokenPair), AuthError> {
        let claims = self.tokens.decode_token(refresh_token, TokenType::Refresh).await?;
        let user = self.tokens.resolve_user(&claims, self.users.as_ref()).await?;

        self.tokens.revoke_token(&claims).await?;

        let pair = self.issue_pair(&user)?;
        tracing::debug!(user_id = %user.id, "refresh token rotated");
        Ok((user, pair))
    }

    /// Revoke the access token and, when it belongs to the same user, the refresh token.
    ///
    /// The refresh token is checked before anything is revoked, so a rejected
    /// request leaves both tokens as they were.
    pub async fn logout(
        &self,
        access_claims: &TokenClaims,
        refresh_token: Option<&str>,
    ) -> Result<(), AuthError> {
        let refresh_claims = match refresh_token {
            Some(refresh_token) => match self.tokens.decode_token(refresh_token, TokenType::Refresh).await {
                Ok(claims) => {
                    if claims.sub != access_claims.sub {
                        return Err(AuthError::TokenInvalid);
                    }
                    Some(claims)
                }
                // Already unusable
                Err(AuthError::TokenExpired) | Err(AuthError::TokenRevoked) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        self.tokens.revoke_token(access_claims).await?;
        if let Some(claims) = refresh_claims {
            self.tokens.revoke_token(&claims).await?;
        }

        tracing::info!(sub = ?access_claims.sub, "user logged out");
        Ok(())
    }

    pub async fn change_password(&self, user: &User, request: PasswordUpdate) -> Result<(), AuthError> {
        request.check()?;

        verify_password(&request.current_password, &user.password_hash).map_err(|e| match e {
            AuthError::InvalidCredentials => AuthError::IncorrectPassword,
            other => other,
        })?;

        let password_hash = hash_password(&request.new_password)?;
        self.users
            .update_password(user.id, &password_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to update password: {:#}", e)))?;

        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let (access_token, access_claims) = self.tokens.issue_token(user.id, TokenType::Access, None)?;
        let refresh_token = self.tokens.create_token(user.id, TokenType::Refresh, None)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at: access_claims.exp,
        })
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::PasswordHashingFailed(format!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
