// Domain modules
pub mod auth;
pub mod calculation;
pub mod web;
