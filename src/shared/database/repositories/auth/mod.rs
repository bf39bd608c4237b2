// Auth repositories
pub mod user_repository;
pub mod token_blacklist_repository;

pub use user_repository::*;
pub use token_blacklist_repository::*;
