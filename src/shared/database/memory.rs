//! In-memory store backing the server when no `DATABASE_URL` is configured.
//!
//! Also used by the test suite. Data lives for the lifetime of the process.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::domains::auth::models::{NewUser, User};
use crate::domains::calculation::models::{Calculation, NewCalculation};
use crate::shared::database::stores::{CalculationStore, RevocationStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    blacklist: RwLock<HashMap<String, DateTime<Utc>>>,
    /// Insertion order, oldest first
    calculations: RwLock<Vec<Calculation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the active flag (admin-style operation, used by tests)
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.is_active = is_active;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        // Same guarantees as the UNIQUE constraints in Postgres
        if users
            .values()
            .any(|u| u.email == new_user.email || u.username == new_user.username)
        {
            bail!("duplicate key value violates unique constraint");
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
            last_login: None,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            bail!("user {} does not exist", id);
        };
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn is_blacklisted(&self, jti: &str) -> Result<bool> {
        Ok(self.blacklist.read().await.contains_key(jti))
    }

    async fn blacklist(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<()> {
        self.blacklist
            .write()
            .await
            .entry(jti.to_string())
            .or_insert(expires_at);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut blacklist = self.blacklist.write().await;
        let before = blacklist.len();
        blacklist.retain(|_, expires_at| *expires_at >= now);
        Ok((before - blacklist.len()) as u64)
    }
}

#[async_trait]
impl CalculationStore for MemoryStore {
    async fn create_calculation(&self, new: NewCalculation) -> Result<Calculation> {
        let now = Utc::now();
        let calculation = Calculation {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            calculation_type: new.calculation_type,
            inputs: new.inputs,
            result: new.result,
            created_at: now,
            updated_at: now,
        };
        self.calculations.write().await.push(calculation.clone());
        Ok(calculation)
    }

    async fn find_calculation(&self, id: Uuid, user_id: Uuid) -> Result<Option<Calculation>> {
        let calculations = self.calculations.read().await;
        Ok(calculations
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn list_calculations(&self, user_id: Uuid) -> Result<Vec<Calculation>> {
        let calculations = self.calculations.read().await;
        Ok(calculations
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_calculation(
        &self,
        id: Uuid,
        user_id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<Calculation>> {
        let mut calculations = self.calculations.write().await;
        match calculations
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
        {
            Some(calculation) => {
                calculation.inputs = inputs.to_vec();
                calculation.result = result;
                calculation.updated_at = Utc::now();
                Ok(Some(calculation.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_calculation(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut calculations = self.calculations.write().await;
        let before = calculations.len();
        calculations.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(calculations.len() != before)
    }
}
