//! Data models
//!
//! Shared between the backend and the admin client (via API).

pub mod activity_log;
pub mod role_rights;

// Re-exports
pub use activity_log::*;
pub use role_rights::*;
