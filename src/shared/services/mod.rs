// Shared services
pub mod app_state;
pub mod blacklist_cleanup;

pub use app_state::*;
pub use blacklist_cleanup::*;
