//! Shared types for the admin back office
//!
//! Wire and domain types exchanged with the REST backend: role rights,
//! session user, activity log entries, page identifiers and the response
//! envelope.

pub mod client;
pub mod models;
pub mod pages;
pub mod response;
pub mod util;

// Re-exports
pub use client::{LoginRequest, LoginResponse, SessionUser};
pub use models::{ActivityLogEntry, MutationKind, PagePermission, RoleRightsEntry};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
