use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token kind, written into the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, authorizes API requests
    Access,
    /// Long-lived, exchanged for a new token pair
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token payload
///
/// Wire fields are exactly `sub`, `type`, `iat`, `exp` and `jti`.
/// `sub` stays optional here so a signed token without a subject still
/// decodes and is rejected later as a malformed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Revocation key
    pub jti: String,
}

impl TokenClaims {
    /// Valid at `now` as far as time goes: `now < exp`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
