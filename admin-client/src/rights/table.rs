//! Indexed role rights table (role → page → record)

use shared::{PagePermission, RoleRightsEntry};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Role rights as loaded from the backend, indexed for lookup
///
/// Duplicate roles, or duplicate pages within a role, keep the first
/// occurrence.
#[derive(Debug, Clone, Default)]
pub struct RightsTable {
    roles: HashMap<String, HashMap<String, PagePermission>>,
}

impl RightsTable {
    pub fn new(entries: Vec<RoleRightsEntry>) -> Self {
        let mut roles: HashMap<String, HashMap<String, PagePermission>> =
            HashMap::with_capacity(entries.len());

        for entry in entries {
            let pages = match roles.entry(entry.role) {
                Entry::Occupied(o) => {
                    tracing::warn!(
                        role = %o.key(),
                        "Duplicate role in rights table, keeping first"
                    );
                    continue;
                }
                Entry::Vacant(v) => v.insert(HashMap::with_capacity(entry.permissions.len())),
            };

            for record in entry.permissions {
                match pages.entry(record.page.clone()) {
                    Entry::Occupied(o) => {
                        tracing::warn!(page = %o.key(), "Duplicate page permission, keeping first");
                    }
                    Entry::Vacant(v) => {
                        v.insert(record);
                    }
                }
            }
        }

        Self { roles }
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Exact-match lookup of `page` for `role`
    pub fn lookup(&self, role: &str, page: &str) -> Option<&PagePermission> {
        self.roles.get(role)?.get(page)
    }
}
