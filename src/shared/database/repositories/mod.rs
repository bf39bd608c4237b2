// All repositories module
pub mod auth;
pub mod calculation;

// Re-export all repositories for convenience
pub use auth::*;
pub use calculation::*;
