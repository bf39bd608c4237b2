// Auth domain models
pub mod auth;
pub mod token;
pub mod user;

pub use auth::*;
pub use token::*;
pub use user::*;
