//! Role rights cache with single-flight loading
//!
//! # 状态机
//!
//! ```text
//! Empty ──trigger/ensure──▶ Loading ──ok, non-empty──▶ Loaded
//!   ▲                          │
//!   │                          ├──ok, empty──▶ Empty
//!   └────────reset()           └──err──▶ Failed ──trigger/ensure──▶ Loading
//! ```
//!
//! The `Empty|Failed → Loading` transition happens under the watch channel's
//! lock, so at most one load is in flight at a time. A `Loaded` cache is
//! never reloaded until [`RightsCache::reset`].
//!
//! Each reset starts a new generation. A load only publishes a result fetched
//! in the current generation; a reset during a load keeps the state `Loading`
//! and the in-flight load fetches again instead of a second load starting.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::RoleRightsEntry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

use super::table::RightsTable;
use crate::{ClientError, ClientResult};

/// Backend that serves the full rights table
#[async_trait]
pub trait RightsSource: Send + Sync {
    async fn fetch_rights(&self) -> ClientResult<Vec<RoleRightsEntry>>;
}

/// Load state of the rights cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never loaded, reset, or the backend returned no rows
    Empty,
    /// A load is in flight
    Loading,
    /// Table holds at least one role
    Loaded,
    /// Last load failed; cache stays empty
    Failed,
}

impl LoadState {
    /// Whether the cache counts as empty and may start a load
    pub fn needs_load(self) -> bool {
        matches!(self, LoadState::Empty | LoadState::Failed)
    }
}

/// 角色权限缓存
pub struct RightsCache {
    source: Arc<dyn RightsSource>,
    table: RwLock<Arc<RightsTable>>,
    state: watch::Sender<LoadState>,
    /// Bumped by reset, only under the state channel's lock
    generation: AtomicU64,
}

impl std::fmt::Debug for RightsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RightsCache")
            .field("state", &self.state())
            .field("roles", &self.table.read().role_count())
            .finish_non_exhaustive()
    }
}

impl RightsCache {
    pub fn new(source: Arc<dyn RightsSource>) -> Arc<Self> {
        let (state, _) = watch::channel(LoadState::Empty);
        Arc::new(Self {
            source,
            table: RwLock::new(Arc::new(RightsTable::default())),
            state,
            generation: AtomicU64::new(0),
        })
    }

    /// Current table (empty until a load succeeds)
    pub fn snapshot(&self) -> Arc<RightsTable> {
        self.table.read().clone()
    }

    pub fn state(&self) -> LoadState {
        *self.state.borrow()
    }

    /// Load state notifications
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Claim the single load slot
    fn try_begin_load(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.needs_load() {
                *state = LoadState::Loading;
                true
            } else {
                false
            }
        })
    }

    /// Start a background load if the cache is empty and none is in flight
    ///
    /// Returns immediately. Without a Tokio runtime the cache stays empty.
    pub fn trigger_load(self: &Arc<Self>) {
        if !self.try_begin_load() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let cache = Arc::clone(self);
                handle.spawn(async move {
                    // failure already logged and recorded as LoadState::Failed
                    let _ = cache.load().await;
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime available, role rights not loaded");
                self.state.send_replace(LoadState::Empty);
            }
        }
    }

    /// Load the table unless already loaded, joining an in-flight load
    ///
    /// Intended for the composition root at session start.
    pub async fn ensure_loaded(&self) -> ClientResult<()> {
        if self.try_begin_load() {
            return self.load().await;
        }

        let mut rx = self.state.subscribe();
        let state = *rx
            .wait_for(|s| *s != LoadState::Loading)
            .await
            .map_err(|_| ClientError::RightsUnavailable)?;

        match state {
            LoadState::Loaded | LoadState::Empty => Ok(()),
            _ => Err(ClientError::RightsUnavailable),
        }
    }

    /// Empty the cache so the next session loads afresh
    ///
    /// A load in flight is not published; it fetches again for the new
    /// generation.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *self.table.write() = Arc::new(RightsTable::default());
            if *state != LoadState::Loading {
                *state = LoadState::Empty;
            }
        });
        tracing::debug!("Role rights cache reset");
    }

    async fn load(&self) -> ClientResult<()> {
        loop {
            let generation = self.generation.load(Ordering::SeqCst);
            let result = self.source.fetch_rights().await;
            if let Some(result) = self.publish(generation, result) {
                return result;
            }
            tracing::debug!("Role rights cache reset during load, fetching again");
        }
    }

    /// Store a fetch result unless a reset happened since it started
    ///
    /// Table and state change together under the state lock, so watchers woken
    /// by the state change see the new table.
    fn publish(
        &self,
        generation: u64,
        result: ClientResult<Vec<RoleRightsEntry>>,
    ) -> Option<ClientResult<()>> {
        let mut outcome = None;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(entries) => {
                    let table = RightsTable::new(entries);
                    *state = if table.is_empty() {
                        tracing::warn!("Role rights table is empty, all pages denied");
                        LoadState::Empty
                    } else {
                        tracing::info!(roles = table.role_count(), "Role rights loaded");
                        LoadState::Loaded
                    };
                    *self.table.write() = Arc::new(table);
                    outcome = Some(Ok(()));
                }
                Err(e) => {
                    tracing::warn!("Failed to load role rights: {}", e);
                    *state = LoadState::Failed;
                    outcome = Some(Err(e));
                }
            }
            true
        });
        outcome
    }
}
