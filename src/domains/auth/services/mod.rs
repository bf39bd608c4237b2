// Auth domain services
pub mod auth_service;
pub mod state;
pub mod token_authority;

pub use auth_service::*;
pub use state::*;
pub use token_authority::*;
