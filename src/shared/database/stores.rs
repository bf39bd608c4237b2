//! Storage capabilities consumed by the domain services.
//!
//! Postgres repositories and the in-memory store both implement these, and
//! `AppState` decides which one backs a running server.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::auth::models::{NewUser, User};
use crate::domains::calculation::models::{Calculation, NewCalculation};

/// User account lookup and mutation
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()>;

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;
}

/// Revoked token ids
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn is_blacklisted(&self, jti: &str) -> Result<bool>;

    /// Idempotent; `expires_at` lets the store purge entries later
    async fn blacklist(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<()>;

    /// Drop entries whose tokens expired before `now`; returns how many
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Calculation records, always scoped to their owner
#[async_trait]
pub trait CalculationStore: Send + Sync {
    async fn create_calculation(&self, calculation: NewCalculation) -> Result<Calculation>;

    async fn find_calculation(&self, id: Uuid, user_id: Uuid) -> Result<Option<Calculation>>;

    /// Newest first
    async fn list_calculations(&self, user_id: Uuid) -> Result<Vec<Calculation>>;

    async fn update_calculation(
        &self,
        id: Uuid,
        user_id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<Calculation>>;

    /// Returns false when nothing was deleted
    async fn delete_calculation(&self, id: Uuid, user_id: Uuid) -> Result<bool>;
}
