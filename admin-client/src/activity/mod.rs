//! 活动日志模块
//!
//! ```text
//! mutation committed
//!   └─ ActivityLogger::record() → mpsc (try_send) → ActivityWorker → ActivitySink (POST)
//! ```
//!
//! Recording never blocks or fails the caller: a full or closed channel
//! drops the entry, a sink failure is logged and swallowed.

pub mod logger;
pub mod worker;

use async_trait::async_trait;
use shared::ActivityLogEntry;

use crate::ClientResult;

pub use logger::ActivityLogger;
pub use worker::ActivityWorker;

/// Destination of activity log entries
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn write(&self, entry: &ActivityLogEntry) -> ClientResult<()>;
}
