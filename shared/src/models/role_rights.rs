//! Role Rights Model

use serde::{Deserialize, Serialize};

/// Permission triple for one administrable page
///
/// Flags absent on the wire deserialize as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePermission {
    /// Page identifier (see [`crate::pages`])
    pub page: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub delete: bool,
}

impl PagePermission {
    pub fn new(page: impl Into<String>, read: bool, write: bool, delete: bool) -> Self {
        Self {
            page: page.into(),
            read,
            write,
            delete,
        }
    }
}

/// Rights table row (RBAC 角色 → 页面权限)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRightsEntry {
    pub role: String,
    /// One record per page, in backend order
    #[serde(default)]
    pub permissions: Vec<PagePermission>,
}

impl RoleRightsEntry {
    pub fn new(role: impl Into<String>, permissions: Vec<PagePermission>) -> Self {
        Self {
            role: role.into(),
            permissions,
        }
    }
}
