//! Role rights resolver
//!
//! Turns (session role, cached rights table, page name) into a
//! [`DerivedPermission`]. Every missing input resolves to
//! [`DerivedPermission::DENIED`]; nothing here returns an error.

use std::sync::Arc;
use tokio::sync::watch;

use super::cache::{LoadState, RightsCache};
use super::permission::DerivedPermission;
use crate::session::{Session, SessionState};

/// Per-page permission gate shared by every admin page
#[derive(Debug, Clone)]
pub struct RoleRightsResolver {
    cache: Arc<RightsCache>,
    session: Arc<SessionState>,
}

impl RoleRightsResolver {
    pub fn new(cache: Arc<RightsCache>, session: Arc<SessionState>) -> Self {
        Self { cache, session }
    }

    pub fn cache(&self) -> &Arc<RightsCache> {
        &self.cache
    }

    /// Resolve the permission for `page_name`
    ///
    /// Starts the background rights load when the cache is empty; callers
    /// during that load get the denied default.
    pub fn resolve(&self, page_name: &str) -> DerivedPermission {
        if self.cache.state().needs_load() {
            self.cache.trigger_load();
        }
        self.compute(page_name)
    }

    fn compute(&self, page_name: &str) -> DerivedPermission {
        let Some(user) = self.session.current_user() else {
            return DerivedPermission::DENIED;
        };
        let Some(role) = user.role() else {
            return DerivedPermission::DENIED;
        };

        let table = self.cache.snapshot();
        match table.lookup(role, page_name) {
            Some(record) => DerivedPermission::from(record),
            None => {
                if !shared::pages::is_known_page(page_name) {
                    tracing::debug!(page = %page_name, "Unknown page identifier, denied");
                }
                DerivedPermission::DENIED
            }
        }
    }

    /// Watch the permission of `page_name` as rights load and sessions change
    pub fn watch(&self, page_name: impl Into<String>) -> PermissionWatch {
        PermissionWatch {
            resolver: self.clone(),
            page: page_name.into(),
            rights: self.cache.subscribe(),
            session: self.session.subscribe(),
            last: None,
        }
    }
}

/// Permission of one page, re-derived when any input changes
///
/// Inputs are the rights table (load completion or reset), the session user
/// (login, logout, re-authentication) and the page name ([`Self::set_page`]).
pub struct PermissionWatch {
    resolver: RoleRightsResolver,
    page: String,
    rights: watch::Receiver<LoadState>,
    session: watch::Receiver<Option<Session>>,
    last: Option<DerivedPermission>,
}

impl PermissionWatch {
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Resolve now and mark all inputs as seen
    pub fn current(&mut self) -> DerivedPermission {
        self.rights.borrow_and_update();
        self.session.borrow_and_update();
        let permission = self.resolver.resolve(&self.page);
        self.last = Some(permission);
        permission
    }

    /// Switch to another page (navigation) and resolve it
    pub fn set_page(&mut self, page_name: impl Into<String>) -> DerivedPermission {
        self.page = page_name.into();
        self.current()
    }

    /// Wait until the derived permission differs from the last one returned
    ///
    /// The watch keeps the cache and session alive, so their channels never
    /// close and this only completes on an actual change.
    pub async fn changed(&mut self) -> DerivedPermission {
        loop {
            // senders are owned through `resolver`, so recv errors cannot occur
            tokio::select! {
                _ = self.rights.changed() => {}
                _ = self.session.changed() => {}
            }

            let previous = self.last;
            let permission = self.current();
            if previous != Some(permission) {
                return permission;
            }
        }
    }
}
