//! 活动日志记录器

use shared::ActivityLogEntry;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Fire-and-forget handle for recording activity entries
///
/// Cheap to clone; every clone feeds the same worker.
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    tx: mpsc::Sender<ActivityLogEntry>,
}

impl ActivityLogger {
    /// Create a logger and the receiver its [`super::ActivityWorker`] drains
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<ActivityLogEntry>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (Self { tx }, rx)
    }

    /// 记录活动日志（非阻塞）
    ///
    /// Never waits for capacity; a full channel drops the entry.
    pub fn record(&self, entry: ActivityLogEntry) {
        match self.tx.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                tracing::warn!(
                    section = %entry.section,
                    "Activity log channel full, entry dropped"
                );
            }
            Err(TrySendError::Closed(entry)) => {
                tracing::error!(
                    section = %entry.section,
                    "Activity log channel closed, entry lost"
                );
            }
        }
    }
}
