// Auth handlers
pub mod auth_handler;
