//! Token Authority: issues and validates signed access/refresh tokens and
//! resolves the authenticated user from an access token.
//!
//! Validation order is signature, expiry, type, revocation. Only the
//! revocation lookup suspends.

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::domains::auth::models::{TokenClaims, TokenType, User};
use crate::shared::config::JwtConfig;
use crate::shared::database::{RevocationStore, UserStore};
use crate::shared::errors::AuthError;

/// Signs and verifies tokens with an immutable key set
#[derive(Clone)]
pub struct TokenAuthority {
    algorithm: Algorithm,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<dyn RevocationStore>,
}

impl TokenAuthority {
    pub fn new(config: &JwtConfig, revocations: Arc<dyn RevocationStore>) -> Self {
        let mut validation = Validation::new(config.algorithm);
        // Expiry is checked by decode_token itself so it can be reported distinctly
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            algorithm: config.algorithm,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Default lifetime for a token kind
    pub fn default_ttl(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_token_ttl,
            TokenType::Refresh => self.refresh_token_ttl,
        }
    }

    /// Sign a token for `subject`.
    ///
    /// `expires_delta` overrides the default lifetime of `token_type`.
    pub fn create_token(
        &self,
        subject: impl ToString,
        token_type: TokenType,
        expires_delta: Option<Duration>,
    ) -> Result<String, AuthError> {
        self.issue_token(subject, token_type, expires_delta)
            .map(|(token, _)| token)
    }

    /// Same as `create_token`, also returning the signed claims
    pub fn issue_token(
        &self,
        subject: impl ToString,
        token_type: TokenType,
        expires_delta: Option<Duration>,
    ) -> Result<(String, TokenClaims), AuthError> {
        let now = Utc::now().timestamp();
        let ttl = expires_delta.unwrap_or_else(|| self.default_ttl(token_type));

        let claims = TokenClaims {
            sub: Some(subject.to_string()),
            token_type,
            iat: now,
            exp: now + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, algorithm = ?self.algorithm, "token signing failed");
                AuthError::TokenCreationFailed
            })?;

        Ok((token, claims))
    }

    /// Decode and validate a token of the expected kind
    pub async fn decode_token(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<TokenClaims, AuthError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected at decode");
                AuthError::TokenInvalid
            })?
            .claims;

        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::TokenExpired);
        }

        // Reported exactly like a malformed token
        if claims.token_type != expected_type {
            tracing::debug!(
                expected = %expected_type,
                actual = %claims.token_type,
                "token rejected for type mismatch"
            );
            return Err(AuthError::TokenInvalid);
        }

        // A failed lookup must never count as "not revoked"
        let revoked = self
            .revocations
            .is_blacklisted(&claims.jti)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check token revocation: {:#}", e)))?;

        if revoked {
            return Err(AuthError::TokenRevoked);
        }

        Ok(claims)
    }

    /// Resolve the active user behind an access token
    pub async fn get_current_user<U>(&self, token: &str, users: &U) -> Result<User, AuthError>
    where
        U: UserStore + ?Sized,
    {
        let claims = self.decode_token(token, TokenType::Access).await?;
        self.resolve_user(&claims, users).await
    }

    /// Subject lookup and account status checks for already validated claims
    pub async fn resolve_user<U>(&self, claims: &TokenClaims, users: &U) -> Result<User, AuthError>
    where
        U: UserStore + ?Sized,
    {
        let user_id = subject_id(claims)?;

        let user = users
            .find_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        Ok(user)
    }

    /// Blacklist the token's jti until its natural expiry
    pub async fn revoke_token(&self, claims: &TokenClaims) -> Result<(), AuthError> {
        // An entry that expired early would be purged while the token is still live
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(|| {
            AuthError::Internal(format!("Token expiry out of range: exp={}", claims.exp))
        })?;

        self.revocations
            .blacklist(&claims.jti, expires_at)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke token: {:#}", e)))?;

        tracing::debug!(jti = %claims.jti, token_type = %claims.token_type, "token revoked");
        Ok(())
    }
}

/// Subject as a user id; anything else is a malformed payload
fn subject_id(claims: &TokenClaims) -> Result<Uuid, AuthError> {
    let sub = claims
        .sub
        .as_deref()
        .filter(|sub| !sub.is_empty())
        .ok_or(AuthError::TokenPayloadMalformed)?;

    Uuid::parse_str(sub).map_err(|_| AuthError::TokenPayloadMalformed)
}
