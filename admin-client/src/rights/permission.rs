//! Derived page permission

use serde::Serialize;
use shared::{MutationKind, PagePermission};

/// Read/write/delete triple plus the single "form disabled" signal a page
/// consults before making any mutation UI interactive.
///
/// Never stored; recomputed from the rights cache on every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPermission {
    pub can_read: bool,
    pub can_write: bool,
    pub can_delete: bool,
    pub is_form_disabled: bool,
}

impl DerivedPermission {
    /// Fail-closed default
    pub const DENIED: Self = Self {
        can_read: false,
        can_write: false,
        can_delete: false,
        is_form_disabled: true,
    };

    /// Usable for editing only with read AND (write OR delete)
    pub const fn new(can_read: bool, can_write: bool, can_delete: bool) -> Self {
        Self {
            can_read,
            can_write,
            can_delete,
            is_form_disabled: !can_read || (!can_write && !can_delete),
        }
    }

    /// Whether a mutation of `kind` may be submitted from this page
    pub fn allows(&self, kind: MutationKind) -> bool {
        self.can_read
            && match kind {
                MutationKind::Create | MutationKind::Update => self.can_write,
                MutationKind::Delete => self.can_delete,
            }
    }
}

impl Default for DerivedPermission {
    fn default() -> Self {
        Self::DENIED
    }
}

impl From<&PagePermission> for DerivedPermission {
    fn from(record: &PagePermission) -> Self {
        Self::new(record.read, record.write, record.delete)
    }
}
