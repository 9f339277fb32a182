//! Session state - 登录会话
//!
//! Holds the signed-in user and token behind a `watch` channel so that
//! permission watchers notice re-authentication. Optionally persisted to
//! `{dir}/session.json` so a restart keeps the login.

use serde::{Deserialize, Serialize};
use shared::SessionUser;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

use crate::ClientResult;

const SESSION_FILE_NAME: &str = "session.json";

/// Persisted login state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    /// Unix millis
    pub logged_in_at: i64,
}

/// 会话状态
pub struct SessionState {
    tx: watch::Sender<Option<Session>>,
    file_path: Option<PathBuf>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("file_path", &self.file_path)
            .field("authenticated", &self.tx.borrow().is_some())
            .finish()
    }
}

impl SessionState {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx,
            file_path: None,
        }
    }

    /// Session persisted under `dir`, restored from disk when present
    ///
    /// An unreadable session file is treated as logged out.
    pub fn persistent(dir: &Path) -> ClientResult<Self> {
        std::fs::create_dir_all(dir)?;
        let file_path = dir.join(SESSION_FILE_NAME);

        let restored = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            match serde_json::from_str::<Session>(&content) {
                Ok(session) => {
                    tracing::debug!(username = %session.user.username, "Session restored");
                    Some(session)
                }
                Err(e) => {
                    tracing::warn!(
                        path = %file_path.display(),
                        "Discarding unreadable session file: {}",
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        let (tx, _) = watch::channel(restored);
        Ok(Self {
            tx,
            file_path: Some(file_path),
        })
    }

    /// Current user, `None` when unauthenticated
    pub fn current_user(&self) -> Option<SessionUser> {
        self.tx.borrow().as_ref().map(|s| s.user.clone())
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Change notifications (login, logout, re-authentication)
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Store a successful login; persisted before it becomes visible
    pub fn set_login(&self, token: impl Into<String>, user: SessionUser) -> ClientResult<()> {
        let session = Session {
            token: token.into(),
            user,
            logged_in_at: shared::util::now_millis(),
        };

        if let Some(path) = &self.file_path {
            let content = serde_json::to_string_pretty(&session)?;
            std::fs::write(path, content)?;
        }

        tracing::debug!(
            username = %session.user.username,
            role = %session.user.role,
            "Session updated"
        );
        self.tx.send_replace(Some(session));
        Ok(())
    }

    /// 登出：清除会话
    pub fn clear(&self) -> ClientResult<()> {
        if let Some(path) = &self.file_path
            && let Err(e) = std::fs::remove_file(path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            return Err(e.into());
        }
        self.tx.send_replace(None);
        Ok(())
    }
}
