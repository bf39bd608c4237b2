// Auth domain state
use std::sync::Arc;
use crate::domains::auth::services::{AuthService, TokenAuthority};
use crate::shared::database::UserStore;

/// Services the auth handlers and the `AuthenticatedUser` extractor need
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub token_authority: Arc<TokenAuthority>,
    pub users: Arc<dyn UserStore>,
}

impl AuthState {
    pub fn new(users: Arc<dyn UserStore>, token_authority: Arc<TokenAuthority>) -> Self {
        Self {
            auth_service: AuthService::new(users.clone(), token_authority.clone()),
            token_authority,
            users,
        }
    }
}
