//! 页面权限模块
//!
//! - [`RightsCache`] - 角色权限表缓存（单次加载）
//! - [`RoleRightsResolver`] - 页面权限解析，失败即拒绝
//! - [`DerivedPermission`] - 读/写/删 + 表单禁用标志

pub mod cache;
pub mod permission;
pub mod resolver;
pub mod table;

pub use cache::{LoadState, RightsCache, RightsSource};
pub use permission::DerivedPermission;
pub use resolver::{PermissionWatch, RoleRightsResolver};
pub use table::RightsTable;
