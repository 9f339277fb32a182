//! Admin Client - access core of the admin back office
//!
//! Role-rights permission gate for every admin page plus the activity log
//! side effect of every committed mutation.

pub mod activity;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod logger;
pub mod mutation;
pub mod rights;
pub mod session;

pub use activity::{ActivityLogger, ActivitySink, ActivityWorker};
pub use config::ClientConfig;
pub use context::AdminContext;
pub use error::{ClientError, ClientResult};
pub use http::NetworkHttpClient;
pub use mutation::{Change, MutationPipeline, Section};
pub use rights::{
    DerivedPermission, PermissionWatch, RightsCache, RightsSource, RoleRightsResolver,
};
pub use session::{Session, SessionState};

// Re-export shared types for convenience
pub use shared::{
    ActivityLogEntry, MutationKind, PagePermission, RoleRightsEntry, SessionUser, pages,
};
