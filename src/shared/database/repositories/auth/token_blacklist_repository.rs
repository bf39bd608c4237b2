use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::shared::database::stores::RevocationStore;

/// Token blacklist repository
/// Revoked token ids (jti) live here until the token would have expired anyway
pub struct TokenBlacklistRepository {
    pool: PgPool,
}

impl TokenBlacklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for TokenBlacklistRepository {
    async fn is_blacklisted(&self, jti: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (SELECT 1 FROM token_blacklist WHERE jti = $1) AS revoked
            "#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check token blacklist")?;

        Ok(row.get("revoked"))
    }

    async fn blacklist(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO token_blacklist (jti, expires_at, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to blacklist token")?;

        Ok(())
    }

    // Delete entries whose tokens have expired (cleanup)
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM token_blacklist
            WHERE expires_at < $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to delete expired blacklist entries")?;

        Ok(result.rows_affected())
    }
}
