use std::sync::Arc;
use crate::domains::auth::services::{AuthState, TokenAuthority};
use crate::domains::calculation::services::CalculationState;
use crate::shared::config::Config;
use crate::shared::database::{
    CalculationRepository, CalculationStore, Database, MemoryStore, RevocationStore,
    TokenBlacklistRepository, UserRepository, UserStore,
};

/// Application state (combines all domain states)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_state: AuthState,
    pub calculation_state: CalculationState,
    /// Kept for the blacklist cleanup scheduler
    pub revocations: Arc<dyn RevocationStore>,
}

impl AppState {
    /// Postgres-backed state
    pub fn new(config: Config, db: Database) -> Self {
        let pool = db.pool().clone();

        Self::from_stores(
            config,
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(TokenBlacklistRepository::new(pool.clone())),
            Arc::new(CalculationRepository::new(pool)),
        )
    }

    /// Process-local state, used without `DATABASE_URL` and in tests
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_stores(config, store.clone(), store.clone(), store)
    }

    pub fn from_stores(
        config: Config,
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
        calculations: Arc<dyn CalculationStore>,
    ) -> Self {
        let token_authority = Arc::new(TokenAuthority::new(&config.jwt, revocations.clone()));

        Self {
            config: Arc::new(config),
            auth_state: AuthState::new(users, token_authority),
            calculation_state: CalculationState::new(calculations),
            revocations,
        }
    }
}
