// Web (HTML) domain module
pub mod handlers;
pub mod routes;

pub use routes::*;
